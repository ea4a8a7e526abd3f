//! Time-ordered semantic model of a sequence diagram.
//!
//! The model is produced in two steps: [`extract_lifelines`](crate::extract::extract_lifelines)
//! creates the participants, then the [timeline scanner](crate::scan) appends
//! messages, fragments, notes and separators in timeline order. Entities
//! refer to each other through typed indices into the owning
//! [`SequenceDiagram`].

use std::fmt;

use indexmap::IndexMap;

use seqshape_core::color::HexColor;

pub use seqshape_syntax::SeparatorKind;

macro_rules! index_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            pub fn new(index: usize) -> Self {
                Self(index)
            }

            pub fn get(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

index_type!(
    /// Position of a [`Lifeline`] in first-appearance order.
    LifelineIdx
);
index_type!(
    /// Position of a [`Message`] on the timeline.
    MessageIdx
);
index_type!(
    /// Position of a [`Fragment`] in opening order.
    FragmentIdx
);

/// A participant's vertical timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifeline {
    name: String,
    index: LifelineIdx,
}

impl Lifeline {
    pub fn new(name: impl Into<String>, index: LifelineIdx) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> LifelineIdx {
        self.index
    }
}

/// Kind of a message, selecting its line and head style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Synchronous,
    Asynchronous,
    Reply,
    Found,
    Lost,
    /// A message whose sender and receiver are the same lifeline.
    SelfReference,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    index: MessageIdx,
    from: LifelineIdx,
    to: LifelineIdx,
    kind: MessageKind,
    text: String,
    color: HexColor,
}

impl Message {
    pub fn index(&self) -> MessageIdx {
        self.index
    }

    pub fn from(&self) -> LifelineIdx {
        self.from
    }

    pub fn to(&self) -> LifelineIdx {
        self.to
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Label text; empty when the message has no label.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> &HexColor {
        &self.color
    }

    pub fn is_self_reference(&self) -> bool {
        self.kind == MessageKind::SelfReference
    }
}

/// Interaction operator of a combined fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Ref,
    Alt,
    Opt,
    Par,
    Loop,
    Break,
    Critical,
    Assert,
    Neg,
    Ignore,
    Consider,
    Unknown,
}

impl FragmentKind {
    /// Maps a block keyword to its kind. Unrecognized keywords map to
    /// [`FragmentKind::Unknown`].
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "ref" => Self::Ref,
            "alt" => Self::Alt,
            "opt" => Self::Opt,
            "par" => Self::Par,
            "loop" => Self::Loop,
            "break" => Self::Break,
            "critical" => Self::Critical,
            "assert" => Self::Assert,
            "neg" => Self::Neg,
            "ignore" => Self::Ignore,
            "consider" => Self::Consider,
            _ => Self::Unknown,
        }
    }

    /// The lowercase keyword shown in the fragment's corner.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Ref => "ref",
            Self::Alt => "alt",
            Self::Opt => "opt",
            Self::Par => "par",
            Self::Loop => "loop",
            Self::Break => "break",
            Self::Critical => "critical",
            Self::Assert => "assert",
            Self::Neg => "neg",
            Self::Ignore => "ignore",
            Self::Consider => "consider",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A combined fragment covering the messages `begin..=end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    index: FragmentIdx,
    begin: MessageIdx,
    end: MessageIdx,
    kind: FragmentKind,
}

impl Fragment {
    pub fn index(&self) -> FragmentIdx {
        self.index
    }

    pub fn begin(&self) -> MessageIdx {
        self.begin
    }

    pub fn end(&self) -> MessageIdx {
        self.end
    }

    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    /// Whether `message` lies inside this fragment.
    pub fn covers(&self, message: MessageIdx) -> bool {
        self.begin <= message && message <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteSide {
    /// Left of the message's sender.
    Left,
    /// Right of the message's receiver.
    Right,
}

/// A comment box attached to one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    message: MessageIdx,
    side: NoteSide,
    text: String,
    color: HexColor,
}

impl Note {
    pub fn message(&self) -> MessageIdx {
        self.message
    }

    pub fn side(&self) -> NoteSide {
        self.side
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> &HexColor {
        &self.color
    }
}

/// A full-width marker placed after message `before`, or ahead of every
/// message when `before` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator {
    text: String,
    kind: SeparatorKind,
    before: Option<MessageIdx>,
}

impl Separator {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> SeparatorKind {
        self.kind
    }

    pub fn before(&self) -> Option<MessageIdx> {
        self.before
    }
}

/// Aggregate root owning every entity of one diagram.
///
/// Timeline entities are append-only. The number of messages pushed so far is
/// the single cursor that assigns message indices, anchors separators and
/// delimits fragments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceDiagram {
    lifelines: IndexMap<String, Lifeline>,
    messages: Vec<Message>,
    fragments: Vec<Fragment>,
    notes: Vec<Note>,
    separators: Vec<Separator>,
}

impl SequenceDiagram {
    /// Creates a diagram with the given participants and an empty timeline.
    ///
    /// Lifelines are re-indexed by their position in `lifelines`; a repeated
    /// name keeps its first position.
    pub fn new(lifelines: impl IntoIterator<Item = Lifeline>) -> Self {
        let mut map = IndexMap::new();
        for lifeline in lifelines {
            let index = LifelineIdx::new(map.len());
            map.entry(lifeline.name)
                .or_insert_with_key(|name| Lifeline::new(name.clone(), index));
        }
        Self {
            lifelines: map,
            ..Self::default()
        }
    }

    /// Creates a diagram whose lifelines are `names` in order.
    pub fn with_lifeline_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| Lifeline::new(name, LifelineIdx::new(i))),
        )
    }

    pub fn lifelines(&self) -> impl DoubleEndedIterator<Item = &Lifeline> + ExactSizeIterator {
        self.lifelines.values()
    }

    pub fn lifeline_count(&self) -> usize {
        self.lifelines.len()
    }

    pub fn lifeline(&self, index: LifelineIdx) -> Option<&Lifeline> {
        self.lifelines.get_index(index.get()).map(|(_, lifeline)| lifeline)
    }

    /// Looks up a lifeline by participant name.
    pub fn find_lifeline(&self, name: &str) -> Option<LifelineIdx> {
        self.lifelines.get(name).map(Lifeline::index)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message(&self, index: MessageIdx) -> Option<&Message> {
        self.messages.get(index.get())
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn separators(&self) -> &[Separator] {
        &self.separators
    }

    /// Whether no timeline entity has been pushed yet.
    pub fn is_timeline_empty(&self) -> bool {
        self.messages.is_empty()
            && self.fragments.is_empty()
            && self.notes.is_empty()
            && self.separators.is_empty()
    }

    /// Index the next pushed message will get.
    pub fn next_message(&self) -> MessageIdx {
        MessageIdx::new(self.messages.len())
    }

    /// The most recently pushed message, if any.
    pub fn last_message(&self) -> Option<MessageIdx> {
        self.messages.len().checked_sub(1).map(MessageIdx::new)
    }

    /// Appends a message at the end of the timeline.
    ///
    /// A message whose endpoints coincide is always recorded as
    /// [`MessageKind::SelfReference`].
    pub fn push_message(
        &mut self,
        from: LifelineIdx,
        to: LifelineIdx,
        kind: MessageKind,
        text: impl Into<String>,
        color: HexColor,
    ) -> MessageIdx {
        let index = self.next_message();
        let kind = if from == to {
            MessageKind::SelfReference
        } else {
            kind
        };
        self.messages.push(Message {
            index,
            from,
            to,
            kind,
            text: text.into(),
            color,
        });
        index
    }

    /// Appends a fragment covering the messages `begin..=end`.
    ///
    /// Only the scanner creates fragments, so that every fragment covers
    /// messages that exist and nests inside the fragments opened before it.
    pub(crate) fn push_fragment(
        &mut self,
        begin: MessageIdx,
        end: MessageIdx,
        kind: FragmentKind,
    ) -> FragmentIdx {
        debug_assert!(begin <= end, "fragment must cover at least one message");
        let index = FragmentIdx::new(self.fragments.len());
        self.fragments.push(Fragment {
            index,
            begin,
            end,
            kind,
        });
        index
    }

    /// Reserves a fragment slot starting at the next message.
    ///
    /// Reserving before the body is scanned keeps outer fragments ahead of
    /// the fragments nested in them. The slot must be settled with
    /// [`close_fragment`](Self::close_fragment).
    pub(crate) fn open_fragment(&mut self, kind: FragmentKind) -> FragmentIdx {
        let begin = self.next_message();
        self.push_fragment(begin, begin, kind)
    }

    /// Settles a reserved fragment so that it ends at the last pushed message.
    ///
    /// Returns `false` and drops the reservation when no message was pushed
    /// since it was opened.
    pub(crate) fn close_fragment(&mut self, index: FragmentIdx) -> bool {
        let last = self.last_message();
        let Some(fragment) = self.fragments.get_mut(index.get()) else {
            return false;
        };
        match last {
            Some(end) if end >= fragment.begin => {
                fragment.end = end;
                true
            }
            _ => {
                self.fragments.truncate(index.get());
                false
            }
        }
    }

    pub fn push_note(
        &mut self,
        message: MessageIdx,
        side: NoteSide,
        text: impl Into<String>,
        color: HexColor,
    ) {
        self.notes.push(Note {
            message,
            side,
            text: text.into(),
            color,
        });
    }

    /// Appends a separator anchored to the last pushed message.
    pub fn push_separator(&mut self, kind: SeparatorKind, text: impl Into<String>) {
        let before = self.last_message();
        self.separators.push(Separator {
            text: text.into(),
            kind,
            before,
        });
    }

    /// Notes attached to `message`, in push order.
    pub fn notes_of(&self, message: MessageIdx) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(move |note| note.message == message)
    }

    /// Separators anchored after `message`, or ahead of every message for `None`.
    pub fn separators_before(
        &self,
        message: Option<MessageIdx>,
    ) -> impl Iterator<Item = &Separator> {
        self.separators
            .iter()
            .filter(move |separator| separator.before == message)
    }
}
