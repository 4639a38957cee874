use foundation::time::TimeWindow;

use crate::temporal::{ArcGroup, is_group_visible};

/// Per-frame visibility flags, one per group.
///
/// Convention:
/// - `flags[i]` refers to `groups[i]` of the slice passed to [`cull_groups`].
/// - A hidden group is skipped whole; visible groups are drawn whole and the
///   per-arc fade does the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupVisibility {
    flags: Vec<bool>,
}

impl GroupVisibility {
    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.flags.iter().filter(|v| **v).count()
    }

    /// Indices of visible groups, ascending.
    pub fn iter_visible(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.then_some(i))
    }

    /// Members that will be submitted this frame.
    pub fn visible_member_count<T>(&self, groups: &[ArcGroup<T>]) -> usize {
        self.iter_visible()
            .filter_map(|i| groups.get(i))
            .map(ArcGroup::len)
            .sum()
    }
}

pub fn cull_groups<T>(groups: &[ArcGroup<T>], window: &TimeWindow) -> GroupVisibility {
    GroupVisibility {
        flags: groups.iter().map(|g| is_group_visible(g, window)).collect(),
    }
}

pub fn visible_groups<'a, T>(
    groups: &'a [ArcGroup<T>],
    window: &'a TimeWindow,
) -> impl Iterator<Item = &'a ArcGroup<T>> + 'a {
    groups.iter().filter(move |g| is_group_visible(g, window))
}
