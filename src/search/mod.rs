use crate::config::{DashboardConfig, IndexMode};
use crate::events::{Effect, EventKind, HandlerTable, Target, UiEvent};
use crate::models::{NavEntry, NavLink, SEARCH_INPUT_ID, SEARCH_RESULTS_ID, SHOW_CLASS};

/// Builds the search index from a sidebar snapshot, keeping encounter order.
pub(crate) fn build_index(links: &[NavLink]) -> Vec<NavEntry> {
    links.iter().filter_map(NavEntry::from_link).collect()
}

/// Normalized query text. Only constructed for queries worth rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SearchQuery(String);

impl SearchQuery {
    /// Trims and lower-cases `raw`; `None` when shorter than `min_chars`.
    pub fn parse(raw: &str, min_chars: usize) -> Option<Self> {
        let q = raw.trim().to_lowercase();
        if q.chars().count() < min_chars {
            return None;
        }
        Some(Self(q))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Index entries whose text contains the query, in index order, capped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct MatchSet(Vec<NavEntry>);

impl MatchSet {
    pub fn compute(index: &[NavEntry], query: &SearchQuery, limit: usize) -> Self {
        Self(
            index
                .iter()
                .filter(|e| e.display_text.to_lowercase().contains(query.as_str()))
                .take(limit)
                .cloned()
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_entries(self) -> Vec<NavEntry> {
        self.0
    }
}

/// Where the controller pulls sidebar snapshots from.
pub(crate) type LinkSource = Box<dyn Fn() -> Vec<NavLink>>;

pub(crate) struct SearchFilterController {
    source: LinkSource,
    mode: IndexMode,
    index: Vec<NavEntry>,
    min_chars: usize,
    limit: usize,
}

impl SearchFilterController {
    pub fn new(config: &DashboardConfig, source: LinkSource) -> Self {
        let index = match config.index_mode {
            IndexMode::Eager => build_index(&source()),
            IndexMode::Lazy => Vec::new(),
        };
        Self {
            source,
            mode: config.index_mode,
            index,
            min_chars: config.min_query_chars,
            limit: config.max_search_results,
        }
    }

    pub fn handlers() -> HandlerTable<Self> {
        HandlerTable::new()
            .on(Target::Id(SEARCH_INPUT_ID), EventKind::Input, Self::on_input)
            .on(Target::Id(SEARCH_RESULTS_ID), EventKind::Click, Self::on_result_click)
            .on(Target::Document, EventKind::Click, Self::on_document_click)
    }

    pub fn index(&self) -> &[NavEntry] {
        &self.index
    }

    pub fn search(&mut self, raw: &str) -> Option<MatchSet> {
        let query = SearchQuery::parse(raw, self.min_chars)?;
        if self.mode == IndexMode::Lazy {
            self.index = build_index(&(self.source)());
        }
        Some(MatchSet::compute(&self.index, &query, self.limit))
    }

    fn on_input(&mut self, event: &UiEvent) -> Vec<Effect> {
        let UiEvent::Input { value } = event else {
            return Vec::new();
        };

        match self.search(value) {
            Some(matches) if !matches.is_empty() => vec![
                Effect::RenderResults(matches.into_entries()),
                Effect::AddClass(Target::Id(SEARCH_RESULTS_ID), SHOW_CLASS),
            ],
            _ => hide_results(),
        }
    }

    fn on_result_click(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::Click(click) => click
                .row_href
                .as_deref()
                .filter(|href| !href.is_empty())
                .map(|href| vec![Effect::Navigate(href.to_string())])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn on_document_click(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::Click(click)
                if !click.is_inside(SEARCH_INPUT_ID) && !click.is_inside(SEARCH_RESULTS_ID) =>
            {
                hide_results()
            }
            _ => Vec::new(),
        }
    }
}

fn hide_results() -> Vec<Effect> {
    vec![Effect::RemoveClass(Target::Id(SEARCH_RESULTS_ID), SHOW_CLASS)]
}
