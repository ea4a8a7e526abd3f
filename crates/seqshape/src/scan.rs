//! Timeline scanning.
//!
//! The scanner walks a syntax tree once and appends its time-ordered entities
//! to a [`SequenceDiagram`] whose lifelines were already extracted:
//!
//! - every hop of an edge becomes a message, chained hops in written order;
//! - a round-trip hop (`=>`) schedules an implicit reply, emitted after the
//!   edge's hops and nested block in reverse order of scheduling;
//! - a fragment covers the messages emitted by its body and must not be empty;
//! - a separator is anchored to the last message emitted before it.

use log::{debug, trace};

use seqshape_syntax::{
    Arrow, Diagram, EdgeOption, EdgeStatement, FragmentStatement, Hop, Statement,
};

use crate::{
    config::Palette,
    error::ScanError,
    model::{FragmentKind, LifelineIdx, MessageKind, NoteSide, SequenceDiagram},
};

/// Scans `tree` into `diagram` with the default [`Palette`].
///
/// # Errors
///
/// See [`TimelineScanner::scan`].
pub fn scan_timeline(tree: &Diagram, diagram: &mut SequenceDiagram) -> Result<(), ScanError> {
    TimelineScanner::default().scan(tree, diagram)
}

/// Converts statements into timeline entities.
#[derive(Debug, Clone, Default)]
pub struct TimelineScanner {
    palette: Palette,
}

/// A reply scheduled by a round-trip hop.
#[derive(Debug, Clone, Copy)]
struct PendingReply {
    from: LifelineIdx,
    to: LifelineIdx,
}

impl TimelineScanner {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Appends the timeline of `tree` to `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::TimelineNotEmpty`] if `diagram` already holds
    /// timeline entities, [`ScanError::EmptyFragment`] for a fragment whose
    /// body emits no message, and [`ScanError::UnresolvedLifeline`] for a
    /// participant missing from `diagram`'s lifelines. On error, `diagram` is
    /// left partially filled and must be discarded.
    pub fn scan(&self, tree: &Diagram, diagram: &mut SequenceDiagram) -> Result<(), ScanError> {
        if !diagram.is_timeline_empty() {
            return Err(ScanError::TimelineNotEmpty);
        }

        self.scan_statements(tree.statements(), diagram)?;

        debug!(
            messages = diagram.messages().len(),
            fragments = diagram.fragments().len(),
            notes = diagram.notes().len(),
            separators = diagram.separators().len();
            "Timeline scanned"
        );
        Ok(())
    }

    fn scan_statements(
        &self,
        statements: &[Statement],
        diagram: &mut SequenceDiagram,
    ) -> Result<(), ScanError> {
        for statement in statements {
            match statement {
                Statement::Edge(edge) => self.scan_edge(edge, diagram)?,
                Statement::Fragment(fragment) => self.scan_fragment(fragment, diagram)?,
                Statement::Group(group) => self.scan_statements(group.statements(), diagram)?,
                Statement::Separator(separator) => {
                    diagram.push_separator(separator.kind(), separator.text());
                }
                Statement::Node(_) => {}
            }
        }
        Ok(())
    }

    fn scan_edge(
        &self,
        edge: &EdgeStatement,
        diagram: &mut SequenceDiagram,
    ) -> Result<(), ScanError> {
        let label = edge.option("label").unwrap_or_default();
        let left_note = edge.option("leftnote");
        let right_note = edge
            .options()
            .iter()
            .find(|option| matches!(option.key(), "note" | "rightnote"))
            .map(EdgeOption::value);

        let mut pending_replies = Vec::new();

        for hop in edge.hops() {
            let (from, to) = resolve_endpoints(hop, diagram)?;
            let message = diagram.push_message(
                from,
                to,
                message_kind(hop.arrow()),
                label,
                self.palette.message().clone(),
            );
            trace!(message = message.get(), from = from.get(), to = to.get(); "Message scanned");

            if from != to && hop.arrow() == Arrow::RoundTrip {
                pending_replies.push(PendingReply { from: to, to: from });
            }

            if let Some(text) = left_note {
                diagram.push_note(message, NoteSide::Left, text, self.palette.note().clone());
            }
            if let Some(text) = right_note {
                diagram.push_note(message, NoteSide::Right, text, self.palette.note().clone());
            }
        }

        if let Some(block) = edge.block() {
            self.scan_statements(block, diagram)?;
        }

        while let Some(reply) = pending_replies.pop() {
            diagram.push_message(
                reply.from,
                reply.to,
                MessageKind::Reply,
                "",
                self.palette.message().clone(),
            );
        }

        Ok(())
    }

    fn scan_fragment(
        &self,
        fragment: &FragmentStatement,
        diagram: &mut SequenceDiagram,
    ) -> Result<(), ScanError> {
        let at_message = diagram.next_message();
        let index = diagram.open_fragment(FragmentKind::from_keyword(fragment.keyword()));

        self.scan_statements(fragment.statements(), diagram)?;

        if !diagram.close_fragment(index) {
            return Err(ScanError::EmptyFragment {
                keyword: fragment.keyword().to_string(),
                at_message,
            });
        }
        Ok(())
    }
}

/// Returns the `(from, to)` lifelines of `hop` following the arrow direction.
fn resolve_endpoints(
    hop: &Hop,
    diagram: &SequenceDiagram,
) -> Result<(LifelineIdx, LifelineIdx), ScanError> {
    let left = lookup(hop.left(), diagram)?;
    let right = lookup(hop.right(), diagram)?;
    if hop.arrow().is_forward() {
        Ok((left, right))
    } else {
        Ok((right, left))
    }
}

fn lookup(name: &str, diagram: &SequenceDiagram) -> Result<LifelineIdx, ScanError> {
    diagram
        .find_lifeline(name)
        .ok_or_else(|| ScanError::UnresolvedLifeline {
            name: name.to_string(),
        })
}

fn message_kind(arrow: Arrow) -> MessageKind {
    match arrow {
        Arrow::Forward | Arrow::ForwardOpen | Arrow::RoundTrip => MessageKind::Synchronous,
        Arrow::Dashed | Arrow::DashedOpen => MessageKind::Asynchronous,
        Arrow::Backward
        | Arrow::BackwardOpen
        | Arrow::BackwardDashed
        | Arrow::BackwardDashedOpen => MessageKind::Reply,
    }
}

#[cfg(test)]
mod tests {
    use seqshape_core::color::HexColor;
    use seqshape_syntax::{GroupStatement, NodeStatement, SeparatorStatement};

    use super::*;
    use crate::{extract::extract_lifelines, model::Message};

    fn edge(first: &str, rest: &[(&str, &str)]) -> EdgeStatement {
        EdgeStatement::chain(first, rest).expect("valid chain")
    }

    fn scan(tree: &Diagram) -> Result<SequenceDiagram, ScanError> {
        let mut diagram = SequenceDiagram::new(extract_lifelines(tree));
        scan_timeline(tree, &mut diagram)?;
        Ok(diagram)
    }

    fn endpoints(diagram: &SequenceDiagram, message: &Message) -> (String, String) {
        let name = |index| {
            diagram
                .lifeline(index)
                .map(|lifeline| lifeline.name().to_string())
                .unwrap_or_default()
        };
        (name(message.from()), name(message.to()))
    }

    #[test]
    fn test_arrow_kinds() {
        assert_eq!(message_kind(Arrow::ForwardOpen), MessageKind::Synchronous);
        assert_eq!(message_kind(Arrow::RoundTrip), MessageKind::Synchronous);
        assert_eq!(message_kind(Arrow::DashedOpen), MessageKind::Asynchronous);
        assert_eq!(message_kind(Arrow::BackwardOpen), MessageKind::Reply);
        assert_eq!(message_kind(Arrow::BackwardDashedOpen), MessageKind::Reply);
    }

    #[test]
    fn test_backward_arrow_swaps_direction() {
        let tree = Diagram::new(vec![edge("foo", &[("<<-", "bar")]).into()]);
        let diagram = scan(&tree).expect("valid diagram");

        let message = &diagram.messages()[0];
        assert_eq!(endpoints(&diagram, message), ("bar".into(), "foo".into()));
        assert_eq!(message.kind(), MessageKind::Reply);
    }

    #[test]
    fn test_round_trip_self_reference_has_no_reply() {
        let tree = Diagram::new(vec![edge("foo", &[("=>", "foo")]).into()]);
        let diagram = scan(&tree).expect("valid diagram");

        assert_eq!(diagram.messages().len(), 1);
        assert!(diagram.messages()[0].is_self_reference());
    }

    #[test]
    fn test_replies_follow_nested_block() {
        let tree = Diagram::new(vec![
            edge("a", &[("=>", "b")])
                .with_option("label", "call")
                .with_block(vec![edge("b", &[("->", "c")]).into()])
                .into(),
        ]);
        let diagram = scan(&tree).expect("valid diagram");

        let summary: Vec<_> = diagram
            .messages()
            .iter()
            .map(|message| {
                let (from, to) = endpoints(&diagram, message);
                (from, to, message.kind(), message.text().to_string())
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a".into(), "b".into(), MessageKind::Synchronous, "call".into()),
                ("b".into(), "c".into(), MessageKind::Synchronous, String::new()),
                ("b".into(), "a".into(), MessageKind::Reply, String::new()),
            ]
        );
    }

    #[test]
    fn test_first_matching_option_wins() {
        let tree = Diagram::new(vec![
            edge("a", &[("->", "b")])
                .with_option("rightnote", "first")
                .with_option("note", "second")
                .with_option("label", "one")
                .with_option("label", "two")
                .into(),
        ]);
        let diagram = scan(&tree).expect("valid diagram");

        assert_eq!(diagram.messages()[0].text(), "one");
        assert_eq!(diagram.notes().len(), 1);
        assert_eq!(diagram.notes()[0].text(), "first");
        assert_eq!(diagram.notes()[0].side(), NoteSide::Right);
    }

    #[test]
    fn test_palette_colors() {
        let palette = Palette::new(
            "112233".parse().expect("color"),
            "445566".parse().expect("color"),
            HexColor::white(),
        );
        let tree = Diagram::new(vec![
            edge("a", &[("=>", "b")]).with_option("note", "n").into(),
        ]);
        let mut diagram = SequenceDiagram::new(extract_lifelines(&tree));
        TimelineScanner::new(palette)
            .scan(&tree, &mut diagram)
            .expect("valid diagram");

        for message in diagram.messages() {
            assert_eq!(message.color().as_str(), "112233");
        }
        assert_eq!(diagram.notes()[0].color().as_str(), "445566");
    }

    #[test]
    fn test_unresolved_lifeline() {
        let tree = Diagram::new(vec![edge("a", &[("->", "b")]).into()]);
        let mut diagram = SequenceDiagram::with_lifeline_names(["a"]);

        let err = scan_timeline(&tree, &mut diagram).unwrap_err();
        assert_eq!(
            err,
            ScanError::UnresolvedLifeline {
                name: "b".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_filled_timeline() {
        let tree = Diagram::new(vec![edge("a", &[("->", "b")]).into()]);
        let mut diagram = scan(&tree).expect("valid diagram");

        let err = scan_timeline(&tree, &mut diagram).unwrap_err();
        assert_eq!(err, ScanError::TimelineNotEmpty);
    }

    #[test]
    fn test_group_and_node_emit_nothing_themselves() {
        let tree = Diagram::new(vec![
            NodeStatement::new("a").into(),
            GroupStatement::new(vec![]).into(),
            SeparatorStatement::delay("wait").into(),
        ]);
        let diagram = scan(&tree).expect("valid diagram");

        assert!(diagram.messages().is_empty());
        assert_eq!(diagram.separators().len(), 1);
        assert_eq!(diagram.separators()[0].before(), None);
    }

    #[test]
    fn test_empty_group_inside_fragment_is_empty_fragment() {
        let tree = Diagram::new(vec![
            edge("a", &[("->", "b")]).into(),
            FragmentStatement::new("opt", vec![GroupStatement::new(vec![]).into()]).into(),
        ]);

        let err = scan(&tree).unwrap_err();
        assert_eq!(
            err,
            ScanError::EmptyFragment {
                keyword: "opt".to_string(),
                at_message: crate::model::MessageIdx::new(1),
            }
        );
    }
}
