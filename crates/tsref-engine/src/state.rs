//! Mutable per-query state: the result accumulator, the dedup sets that
//! keep cascading sub-searches from re-adding or re-walking work, and
//! the inheritance memo cache.

use rustc_hash::{FxHashMap, FxHashSet};
use tsref_ast::{FileId, NodeIndex};
use tsref_common::CancellationToken;
use tsref_sem::{ImportExport, Snapshot, SymbolId};

use crate::entry::{Definition, Entry, SymbolAndEntries};
use crate::error::{QueryError, Result};
use crate::options::FindReferencesOptions;
use crate::widen::SearchSymbols;

/// One search task: a symbol (with its widened set), the searched text,
/// and the meanings a match must intersect.
#[derive(Debug, Clone)]
pub struct Search {
    /// The query's root symbol; every entry this search produces is
    /// grouped under it.
    pub root: SymbolId,
    /// The symbol this particular search looks for.
    pub symbol: SymbolId,
    pub text: String,
    pub meaning: u32,
    /// Set when this search was spawned across a module boundary, to
    /// stop it bouncing back through the same boundary.
    pub coming_from: Option<ImportExport>,
    all_symbols: Vec<SymbolId>,
    pub parents: Option<Vec<SymbolId>>,
}

impl Search {
    pub fn new(
        root: SymbolId,
        symbol: SymbolId,
        text: String,
        meaning: u32,
        coming_from: Option<ImportExport>,
        widened: SearchSymbols,
    ) -> Search {
        Search {
            root,
            symbol,
            text,
            meaning,
            coming_from,
            all_symbols: widened.all,
            parents: widened.parents,
        }
    }

    pub fn includes(&self, symbol: SymbolId) -> bool {
        self.all_symbols.contains(&symbol)
    }

    pub fn all_symbols(&self) -> &[SymbolId] {
        &self.all_symbols
    }
}

pub struct State<'a> {
    pub snap: Snapshot<'a>,
    pub options: FindReferencesOptions,
    token: CancellationToken,
    /// (descendant, ancestor) -> explicitly inherits.
    inherits_cache: FxHashMap<(SymbolId, SymbolId), bool>,
    /// Export-specifier name nodes whose re-export trace already ran.
    seen_reexport_rhs: FxHashSet<u32>,
    /// (module, exported) pairs already traced through the module graph.
    traced_exports: FxHashSet<(SymbolId, SymbolId)>,
    /// Symbols already searched per file, so cascading sub-searches do
    /// not rescan a file for the same symbol.
    file_searched_symbols: FxHashMap<FileId, FxHashSet<SymbolId>>,
    /// Result group index per definition.
    symbol_groups: FxHashMap<SymbolId, usize>,
    /// (group, entry) pairs already recorded.
    seen_entries: FxHashSet<(usize, Entry)>,
    result: Vec<SymbolAndEntries>,
}

impl<'a> State<'a> {
    pub fn new(
        snap: Snapshot<'a>,
        token: CancellationToken,
        options: FindReferencesOptions,
    ) -> State<'a> {
        State {
            snap,
            options,
            token,
            inherits_cache: FxHashMap::default(),
            seen_reexport_rhs: FxHashSet::default(),
            traced_exports: FxHashSet::default(),
            file_searched_symbols: FxHashMap::default(),
            symbol_groups: FxHashMap::default(),
            seen_entries: FxHashSet::default(),
            result: Vec::new(),
        }
    }

    pub fn check_cancellation(&self) -> Result<()> {
        if self.token.is_canceled() {
            Err(QueryError::Canceled)
        } else {
            Ok(())
        }
    }

    /// Result group for a symbol definition, created on first use.
    pub fn group_for_symbol(&mut self, symbol: SymbolId) -> usize {
        if let Some(&index) = self.symbol_groups.get(&symbol) {
            return index;
        }
        let index = self.result.len();
        self.result
            .push(SymbolAndEntries::new(Definition::Symbol { symbol }));
        self.symbol_groups.insert(symbol, index);
        index
    }

    /// Result group for a non-symbol definition; always fresh.
    pub fn add_group(&mut self, definition: Definition) -> usize {
        self.result.push(SymbolAndEntries::new(definition));
        self.result.len() - 1
    }

    /// Records an entry unless the same (group, entry) pair was already
    /// seen. Cascading sub-searches revisit nodes; results must not.
    pub fn add_reference(&mut self, group: usize, entry: Entry) {
        if self.seen_entries.insert((group, entry)) {
            self.result[group].references.push(entry);
        }
    }

    /// Marks symbols as searched in a file. Returns false when every one
    /// of them was already searched there, meaning the scan can be
    /// skipped entirely.
    pub fn mark_searched_symbols(&mut self, file: FileId, symbols: &[SymbolId]) -> bool {
        let set = self.file_searched_symbols.entry(file).or_default();
        let mut any_new = false;
        for &symbol in symbols {
            if set.insert(symbol) {
                any_new = true;
            }
        }
        any_new
    }

    /// Returns true the first time a re-export specifier name is seen.
    pub fn mark_seen_reexport(&mut self, node: NodeIndex) -> bool {
        self.seen_reexport_rhs.insert(node.0)
    }

    /// Returns true the first time a (module, export) pair is traced.
    pub fn mark_traced_export(&mut self, module: SymbolId, exported: SymbolId) -> bool {
        self.traced_exports.insert((module, exported))
    }

    pub fn cached_inherits(&self, descendant: SymbolId, ancestor: SymbolId) -> Option<bool> {
        self.inherits_cache.get(&(descendant, ancestor)).copied()
    }

    pub fn cache_inherits(&mut self, descendant: SymbolId, ancestor: SymbolId, value: bool) {
        self.inherits_cache.insert((descendant, ancestor), value);
    }

    /// Sorts every group's references into (file order, start, length)
    /// order and hands the groups back.
    pub fn finish(mut self) -> Vec<SymbolAndEntries> {
        let snap = self.snap;
        for group in &mut self.result {
            group
                .references
                .sort_by_key(|entry| entry_sort_key(snap, entry));
        }
        self.result
    }
}

/// Sort key of an entry: file position in snapshot order, then span
/// start, then span length.
pub fn entry_sort_key(snap: Snapshot<'_>, entry: &Entry) -> (usize, u32, u32) {
    match *entry {
        Entry::Node { node, .. } => {
            let file_index = snap
                .file_of_node(node)
                .map_or(usize::MAX, |f| snap.file_index(f.file_id));
            let span = snap
                .arena
                .get(node)
                .map_or(tsref_common::Span::new(u32::MAX, u32::MAX), |n| n.span());
            (file_index, span.start, span.len())
        }
        Entry::Span { file, span } => (snap.file_index(file), span.start, span.len()),
    }
}
