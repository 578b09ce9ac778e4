//! Category filtering for the project grid.
//!
//! Cards keep the order they were declared in. Filtering is a stable
//! partition of that order: matching cards first, the rest after, each group
//! in original order.

/// Time a hidden card keeps its layout slot while it fades out.
pub const FADE_DURATION_MS: u32 = 400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKey {
    All,
    Tag(String),
}

impl From<&str> for FilterKey {
    fn from(raw: &str) -> Self {
        match raw.trim() {
            "all" => FilterKey::All,
            tag => FilterKey::Tag(tag.to_string()),
        }
    }
}

impl FilterKey {
    pub fn matches(&self, categories: &[String]) -> bool {
        match self {
            FilterKey::All => true,
            // An empty tag selects uncategorized cards.
            FilterKey::Tag(tag) if tag.is_empty() => categories.is_empty(),
            FilterKey::Tag(tag) => categories.iter().any(|c| c == tag),
        }
    }
}

/// Result of applying a filter: two disjoint groups covering every card.
#[derive(Debug)]
pub struct Partition<'a, E> {
    pub matched: Vec<&'a E>,
    pub unmatched: Vec<&'a E>,
}

impl<'a, E> Partition<'a, E> {
    /// `matched ++ unmatched`, the order the grid children are reinserted in.
    pub fn display_order(&self) -> impl Iterator<Item = &'a E> + '_ {
        self.matched.iter().chain(self.unmatched.iter()).copied()
    }
}

/// The fixed card collection in original order.
///
/// There is no way to reorder or mutate the stored sequence; display order is
/// always derived from it.
#[derive(Debug)]
pub struct CardSet<E> {
    cards: Vec<(E, Vec<String>)>,
}

impl<E> CardSet<E> {
    /// Build from `(card, data-category)` pairs. Categories are
    /// whitespace-separated.
    pub fn new<S: AsRef<str>>(cards: impl IntoIterator<Item = (E, S)>) -> Self {
        let cards = cards
            .into_iter()
            .map(|(card, raw)| {
                let categories = raw.as_ref().split_whitespace().map(str::to_string).collect();
                (card, categories)
            })
            .collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = &E> {
        self.cards.iter().map(|(card, _)| card)
    }

    pub fn partition(&self, key: &FilterKey) -> Partition<'_, E> {
        let mut matched = Vec::new();
        let mut unmatched = Vec::new();
        for (card, categories) in &self.cards {
            if key.matches(categories) {
                matched.push(card);
            } else {
                unmatched.push(card);
            }
        }
        Partition { matched, unmatched }
    }
}

/// Display state of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Shown,
    /// Fading out; still occupies layout until the removal for `generation`
    /// lands.
    Transitioning { generation: u64 },
    Hidden,
}

/// Tracks card display state so a delayed removal never hides a card that
/// was shown again while it was fading out.
#[derive(Debug)]
pub struct FadeTracker {
    states: Vec<CardState>,
    next_generation: u64,
}

impl FadeTracker {
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![CardState::Shown; len],
            next_generation: 0,
        }
    }

    pub fn state(&self, idx: usize) -> Option<CardState> {
        self.states.get(idx).copied()
    }

    pub fn show(&mut self, idx: usize) {
        if let Some(state) = self.states.get_mut(idx) {
            *state = CardState::Shown;
        }
    }

    /// Start fading a card out. Returns the token the delayed removal must
    /// present, or `None` when the card is already hidden.
    pub fn begin_hide(&mut self, idx: usize) -> Option<u64> {
        let state = self.states.get_mut(idx)?;
        match *state {
            CardState::Hidden => None,
            CardState::Transitioning { generation } => Some(generation),
            CardState::Shown => {
                let generation = self.next_generation;
                self.next_generation += 1;
                *state = CardState::Transitioning { generation };
                Some(generation)
            }
        }
    }

    /// Complete a removal. Returns true when the card should leave layout.
    pub fn finish_hide(&mut self, idx: usize, token: u64) -> bool {
        match self.states.get_mut(idx) {
            Some(state) if *state == (CardState::Transitioning { generation: token }) => {
                *state = CardState::Hidden;
                true
            }
            _ => false,
        }
    }
}
