use super::*;

fn state(limit: u32, total_count: u64, page: u32) -> PaginationState {
    PaginationState::new(NonZeroU32::new(limit).expect("non-zero limit")).settled(page, total_count)
}

#[test]
fn total_pages_rounds_up() {
    assert_eq!(state(10, 25, 1).total_pages(), 3);
    assert_eq!(state(10, 30, 1).total_pages(), 3);
    assert_eq!(state(10, 31, 1).total_pages(), 4);
    assert_eq!(state(1, 7, 1).total_pages(), 7);
}

#[test]
fn zero_total_means_no_pages_and_no_navigation() {
    let empty = state(10, 0, 1);
    assert_eq!(empty.total_pages(), 0);
    assert_eq!(empty.page(), 1);
    assert!(!empty.has_next());
    assert!(!empty.has_previous());
    assert_eq!(empty.next_page(), None);
    assert_eq!(empty.previous_page(), None);
}

#[test]
fn clamp_page_stays_in_bounds_for_any_input() {
    let requests = [i64::MIN, -1_000, -1, 0, 1, 2, 3, 4, 99, i64::from(u32::MAX), i64::MAX];
    for limit in [1, 3, 10, 50] {
        for total in [0, 1, 9, 10, 11, 25, 1_000] {
            let pagination = state(limit, total, 1);
            let upper = pagination.total_pages().max(1);
            for requested in requests {
                let page = pagination.clamp_page(requested);
                assert!(
                    (1..=upper).contains(&page),
                    "limit={limit} total={total} requested={requested} page={page}"
                );
            }
        }
    }
}

#[test]
fn clamp_rounds_to_nearest_boundary() {
    let pagination = state(10, 25, 2);
    assert_eq!(pagination.clamp_page(-5), 1);
    assert_eq!(pagination.clamp_page(0), 1);
    assert_eq!(pagination.clamp_page(2), 2);
    assert_eq!(pagination.clamp_page(4), 3);
}

#[test]
fn navigation_steps_and_stops_at_edges() {
    let first = state(10, 25, 1);
    assert_eq!(first.previous_page(), None);
    assert_eq!(first.next_page(), Some(2));

    let middle = state(10, 25, 2);
    assert_eq!(middle.previous_page(), Some(1));
    assert_eq!(middle.next_page(), Some(3));

    let last = state(10, 25, 3);
    assert_eq!(last.next_page(), None);
    assert_eq!(last.previous_page(), Some(2));
}

#[test]
fn settled_clamps_page_against_new_total() {
    let shrunk = state(10, 100, 9).settled(9, 15);
    assert_eq!(shrunk.page(), 2);
    assert_eq!(shrunk.total_count(), 15);

    let emptied = state(10, 100, 4).settled(4, 0);
    assert_eq!(emptied.page(), 1);
    assert_eq!(emptied.total_pages(), 0);
}

#[test]
fn huge_totals_saturate_page_count() {
    let pagination = state(1, u64::MAX, 1);
    assert_eq!(pagination.total_pages(), u32::MAX);
    assert_eq!(pagination.clamp_page(i64::MAX), u32::MAX);
}
