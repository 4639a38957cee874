use foundation::math::precision::{stable_max, stable_min, stable_total_cmp_f64};
use foundation::time::{TimeSpan, TimeWindow};

/// Members per group when the caller has no better number.
pub const DEFAULT_GROUP_SIZE: usize = 2500;

/// A batch of time-ranged items culled as one unit.
///
/// `start_time` is the smallest member start and `end_time` the largest
/// member end, so a group is never hidden while one of its members could be
/// visible.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcGroup<T> {
    pub start_time: f64,
    pub end_time: f64,
    pub members: Vec<T>,
}

impl<T> ArcGroup<T> {
    fn open() -> Self {
        Self {
            start_time: f64::INFINITY,
            end_time: f64::NEG_INFINITY,
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start_time, self.end_time)
    }
}

/// Partition `items` into groups of at most `group_size`, ordered by start.
///
/// Ordering contract:
/// - Items are stably sorted by `get_start`; ties keep input order and NaN
///   starts sort last.
/// - Groups are returned in ascending `start_time` order and every item lands
///   in exactly one group.
///
/// A `group_size` of 0 is treated as 1.
pub fn group_by_time<T>(
    mut items: Vec<T>,
    get_start: impl Fn(&T) -> f64,
    get_end: impl Fn(&T) -> f64,
    group_size: usize,
) -> Vec<ArcGroup<T>> {
    let group_size = group_size.max(1);
    items.sort_by(|a, b| stable_total_cmp_f64(get_start(a), get_start(b)));

    let mut groups: Vec<ArcGroup<T>> = Vec::with_capacity(items.len().div_ceil(group_size));
    let mut current: Option<ArcGroup<T>> = None;

    for item in items {
        let mut group = match current.take() {
            Some(g) if g.len() < group_size => g,
            Some(full) => {
                groups.push(full);
                ArcGroup::open()
            }
            None => ArcGroup::open(),
        };
        group.start_time = stable_min(group.start_time, get_start(&item));
        group.end_time = stable_max(group.end_time, get_end(&item));
        group.members.push(item);
        current = Some(group);
    }

    if let Some(last) = current {
        groups.push(last);
    }
    groups
}

/// Group-level visibility test: strict overlap of `[start_time, end_time]`
/// with the window.
pub fn is_group_visible<T>(group: &ArcGroup<T>, window: &TimeWindow) -> bool {
    group.start_time < window.hi && group.end_time > window.lo
}
