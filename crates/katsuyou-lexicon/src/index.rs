use bitvec::prelude::*;
use katsuyou_types::{AdjectiveType, Group, JlptLevel, VerbGroup, WordKind};

type BitSet = BitVec<usize, Lsb0>;

const LEVELS: usize = 5;
const KINDS: usize = 2;
const GROUPS: usize = 6;

/// Which entries to return, and which page of them.
///
/// An empty slice leaves that dimension unconstrained; values within one
/// slice are alternatives.
#[derive(Clone, Copy, Debug)]
pub struct EntryFilter<'a> {
    pub levels: &'a [JlptLevel],
    pub kinds: &'a [WordKind],
    pub groups: &'a [Group],
    pub page: usize,
    pub page_size: usize,
}

impl Default for EntryFilter<'_> {
    fn default() -> Self {
        Self {
            levels: &[],
            kinds: &[],
            groups: &[],
            page: 1,
            page_size: 50,
        }
    }
}

/// Bitsets over entry positions, one per level, kind and group.
#[derive(Debug, Clone)]
pub(crate) struct SelectionIndex {
    all: BitSet,
    levels: [BitSet; LEVELS],
    kinds: [BitSet; KINDS],
    groups: [BitSet; GROUPS],
}

fn kind_slot(kind: WordKind) -> usize {
    match kind {
        WordKind::Verb => 0,
        WordKind::Adjective => 1,
    }
}

fn group_slot(group: Group) -> usize {
    match group {
        Group::Verb(VerbGroup::Ichidan) => 0,
        Group::Verb(VerbGroup::Godan) => 1,
        Group::Verb(VerbGroup::IrregularSuru) => 2,
        Group::Verb(VerbGroup::IrregularKuru) => 3,
        Group::Adjective(AdjectiveType::I) => 4,
        Group::Adjective(AdjectiveType::Na) => 5,
    }
}

impl SelectionIndex {
    /// `keys[i]` describes entry `i`; the group is the resolved one.
    pub(crate) fn build(keys: &[(JlptLevel, WordKind, Group)]) -> Self {
        let n = keys.len();
        let mut levels: [BitSet; LEVELS] = array_init::array_init(|_| bitvec![usize, Lsb0; 0; n]);
        let mut kinds: [BitSet; KINDS] = array_init::array_init(|_| bitvec![usize, Lsb0; 0; n]);
        let mut groups: [BitSet; GROUPS] = array_init::array_init(|_| bitvec![usize, Lsb0; 0; n]);

        for (idx, (level, kind, group)) in keys.iter().enumerate() {
            levels[level.index()].set(idx, true);
            kinds[kind_slot(*kind)].set(idx, true);
            groups[group_slot(*group)].set(idx, true);
        }

        Self {
            all: bitvec![usize, Lsb0; 1; n],
            levels,
            kinds,
            groups,
        }
    }

    /// Positions of every entry passing the filter, in load order.
    pub(crate) fn candidates(&self, filter: &EntryFilter<'_>) -> BitSet {
        let mut candidates = self.all.clone();
        narrow(
            &mut candidates,
            filter.levels.iter().map(|l| &self.levels[l.index()]),
        );
        narrow(
            &mut candidates,
            filter.kinds.iter().map(|k| &self.kinds[kind_slot(*k)]),
        );
        narrow(
            &mut candidates,
            filter.groups.iter().map(|g| &self.groups[group_slot(*g)]),
        );
        candidates
    }
}

// Intersect `candidates` with the union of `sets`; no sets means no constraint.
fn narrow<'a>(candidates: &mut BitSet, sets: impl Iterator<Item = &'a BitSet>) {
    let mut union: Option<BitSet> = None;
    for set in sets {
        match union.as_mut() {
            Some(acc) => *acc |= set,
            None => union = Some(set.clone()),
        }
    }
    if let Some(mask) = union {
        *candidates &= &mask;
    }
}
