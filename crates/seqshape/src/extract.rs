//! Participant discovery.

use indexmap::IndexMap;
use log::{debug, trace};

use seqshape_syntax::{Diagram, Statement};

use crate::model::{Lifeline, LifelineIdx};

/// Collects every participant named in `diagram` in first-appearance order.
///
/// The walk is depth-first and left to right. An edge contributes the
/// participants of its hops before those of its nested block; fragment and
/// group bodies are entered transparently. Later mentions of a known name
/// are ignored.
///
/// # Examples
///
/// ```
/// use seqshape::extract::extract_lifelines;
/// use seqshape_syntax::{Diagram, EdgeStatement, NodeStatement};
///
/// let diagram = Diagram::new(vec![
///     NodeStatement::new("db").into(),
///     EdgeStatement::chain("web", &[("->", "db")]).unwrap().into(),
/// ]);
///
/// let names: Vec<_> = extract_lifelines(&diagram)
///     .into_iter()
///     .map(|lifeline| lifeline.name().to_string())
///     .collect();
/// assert_eq!(names, ["db", "web"]);
/// ```
pub fn extract_lifelines(diagram: &Diagram) -> Vec<Lifeline> {
    let mut seen = IndexMap::new();
    collect(diagram.statements(), &mut seen);

    debug!(lifelines = seen.len(); "Lifelines extracted");

    seen.into_iter()
        .map(|(name, index)| Lifeline::new(name, index))
        .collect()
}

fn collect(statements: &[Statement], seen: &mut IndexMap<String, LifelineIdx>) {
    for statement in statements {
        match statement {
            Statement::Edge(edge) => {
                for hop in edge.hops() {
                    visit(hop.left(), seen);
                    visit(hop.right(), seen);
                }
            }
            Statement::Node(node) => visit(node.name(), seen),
            Statement::Fragment(_) | Statement::Group(_) | Statement::Separator(_) => {}
        }
        collect(statement.children(), seen);
    }
}

fn visit(name: &str, seen: &mut IndexMap<String, LifelineIdx>) {
    if seen.contains_key(name) {
        return;
    }
    let index = LifelineIdx::new(seen.len());
    trace!(name, index = index.get(); "New lifeline");
    seen.insert(name.to_string(), index);
}
