// SPDX-License-Identifier: MIT

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use lines_diff::diff::{LineRange, LineRangeSet, OffsetRange};

#[test]
fn offset_range_basics() {
    let r = OffsetRange::new(2, 5);
    assert_eq!(r.len(), 3);
    assert!(!r.is_empty());
    assert!(r.contains(2) && r.contains(4) && !r.contains(5));

    assert!(OffsetRange::empty_at(3).is_empty());
    assert_eq!(OffsetRange::of_length(1, 4), OffsetRange::new(1, 5));

    assert_eq!(r.delta(2), OffsetRange::new(4, 7));
    assert_eq!(r.delta(-2), OffsetRange::new(0, 3));
    assert_eq!(r.join(&OffsetRange::new(7, 9)), OffsetRange::new(2, 9));
}

#[test]
fn offset_range_intersection() {
    let r = OffsetRange::new(2, 5);
    assert_eq!(r.intersect(&OffsetRange::new(4, 8)), Some(OffsetRange::new(4, 5)));
    // Touching ranges intersect in an empty range.
    assert_eq!(r.intersect(&OffsetRange::new(5, 8)), Some(OffsetRange::new(5, 5)));
    assert_eq!(r.intersect(&OffsetRange::new(6, 8)), None);

    assert!(r.intersects(&OffsetRange::new(4, 8)));
    assert!(!r.intersects(&OffsetRange::new(5, 8)));
    assert!(r.intersects_or_touches(&OffsetRange::new(5, 8)));
    assert!(!r.intersects_or_touches(&OffsetRange::new(6, 8)));
}

#[test]
fn line_range_basics() {
    let r = LineRange::new(2, 5);
    assert_eq!(r.length(), 3);
    assert!(r.contains(2) && r.contains(4) && !r.contains(5) && !r.contains(1));
    assert!(LineRange::new(3, 3).is_empty());

    assert_eq!(r.delta(3), LineRange::new(5, 8));
    assert_eq!(r.join(&LineRange::new(7, 9)), LineRange::new(2, 9));

    // Margins clamp at the first line.
    assert_eq!(LineRange::new(2, 4).add_margin(3, 1), LineRange::new(1, 5));
}

#[test]
fn line_range_intersect_and_touch() {
    let r = LineRange::new(2, 5);
    assert_eq!(r.intersect(&LineRange::new(4, 8)), Some(LineRange::new(4, 5)));
    assert_eq!(r.intersect(&LineRange::new(5, 8)), Some(LineRange::new(5, 5)));
    assert_eq!(r.intersect(&LineRange::new(6, 8)), None);

    assert!(r.overlaps(&LineRange::new(4, 8)));
    assert!(!r.overlaps(&LineRange::new(5, 8)));
    assert!(r.touches(&LineRange::new(5, 8)));
    assert!(!r.touches(&LineRange::new(6, 8)));
}

#[test]
fn line_range_distance() {
    let r = LineRange::new(5, 8);
    assert_eq!(r.distance_to_range(&LineRange::new(10, 12)), 2);
    assert_eq!(r.distance_to_range(&LineRange::new(1, 3)), 2);
    assert_eq!(r.distance_to_range(&LineRange::new(6, 7)), 0);
    assert_eq!(r.distance_to_range(&LineRange::new(8, 9)), 0);

    assert_eq!(r.distance_to_line(3), 1);
    // Adjacent lines touch the range.
    assert_eq!(r.distance_to_line(4), 0);
    assert_eq!(r.distance_to_line(7), 0);
    assert_eq!(r.distance_to_line(8), 0);
    assert_eq!(r.distance_to_line(9), 1);
}

#[test]
fn line_range_subtract() {
    let r = LineRange::new(2, 10);
    assert_eq!(r.subtract(&LineRange::new(4, 6)), vec![LineRange::new(2, 4), LineRange::new(6, 10)]);
    assert_eq!(r.subtract(&LineRange::new(1, 4)), vec![LineRange::new(4, 10)]);
    assert_eq!(r.subtract(&LineRange::new(8, 12)), vec![LineRange::new(2, 8)]);
    assert_eq!(r.subtract(&LineRange::new(1, 12)), Vec::<LineRange>::new());
    assert_eq!(r.subtract(&LineRange::new(10, 12)), vec![LineRange::new(2, 10)]);
}

#[test]
fn line_range_set_add() {
    let mut set = LineRangeSet::new();
    set.add_range(LineRange::new(10, 12));
    set.add_range(LineRange::new(2, 4));
    assert_eq!(set.ranges(), &[LineRange::new(2, 4), LineRange::new(10, 12)]);

    // Touching ranges merge.
    set.add_range(LineRange::new(4, 6));
    assert_eq!(set.ranges(), &[LineRange::new(2, 6), LineRange::new(10, 12)]);

    // A range spanning several entries swallows them all.
    set.add_range(LineRange::new(5, 11));
    assert_eq!(set.ranges(), &[LineRange::new(2, 12)]);

    // Empty ranges are ignored.
    set.add_range(LineRange::new(20, 20));
    assert_eq!(set.ranges(), &[LineRange::new(2, 12)]);
}

#[test]
fn line_range_set_queries() {
    let set = LineRangeSet::from_normalized_ranges(vec![
        LineRange::new(2, 4),
        LineRange::new(8, 10),
    ]);
    assert!(set.contains(2) && set.contains(3) && !set.contains(4));
    assert!(set.contains(9) && !set.contains(10));

    assert!(set.intersects(&LineRange::new(3, 5)));
    assert!(!set.intersects(&LineRange::new(4, 8)));
    assert!(set.intersects(&LineRange::new(1, 20)));
}

#[test]
fn line_range_set_union_and_intersection() {
    let a = LineRangeSet::from_normalized_ranges(vec![
        LineRange::new(1, 4),
        LineRange::new(8, 10),
    ]);
    let b = LineRangeSet::from_normalized_ranges(vec![
        LineRange::new(3, 6),
        LineRange::new(9, 12),
    ]);

    assert_eq!(
        a.get_union(&b).ranges(),
        &[LineRange::new(1, 6), LineRange::new(8, 12)]
    );
    assert_eq!(
        a.get_intersection(&b).ranges(),
        &[LineRange::new(3, 4), LineRange::new(9, 10)]
    );
}

#[test]
fn line_range_set_subtract_from() {
    let set = LineRangeSet::from_normalized_ranges(vec![
        LineRange::new(3, 5),
        LineRange::new(7, 9),
    ]);
    assert_eq!(
        set.subtract_from(&LineRange::new(1, 12)).ranges(),
        &[LineRange::new(1, 3), LineRange::new(5, 7), LineRange::new(9, 12)]
    );
    assert_eq!(
        set.subtract_from(&LineRange::new(3, 9)).ranges(),
        &[LineRange::new(5, 7)]
    );
    assert!(set.subtract_from(&LineRange::new(3, 5)).is_empty());
}

#[test]
fn line_range_union_many() {
    let union = LineRange::union_many(vec![
        vec![LineRange::new(1, 3), LineRange::new(10, 12)],
        vec![LineRange::new(2, 5)],
    ]);
    assert_eq!(union, vec![LineRange::new(1, 5), LineRange::new(10, 12)]);
}

fn arbitrary_range() -> impl Strategy<Value = LineRange> {
    (1u32..50, 0u32..10).prop_map(|(start, len)| LineRange::of_length(start, len))
}

proptest! {
    #[test]
    fn set_stays_normalized(ranges in prop::collection::vec(arbitrary_range(), 0..20)) {
        let mut set = LineRangeSet::new();
        for range in &ranges {
            set.add_range(*range);
        }

        // Sorted, non-empty, never touching.
        for pair in set.ranges().windows(2) {
            prop_assert!(pair[0].end_line_number_exclusive < pair[1].start_line_number);
        }
        for range in set.ranges() {
            prop_assert!(!range.is_empty());
        }

        // Exactly the added lines are contained.
        for line in 1u32..70 {
            let expected = ranges.iter().any(|r| r.contains(line));
            prop_assert_eq!(set.contains(line), expected);
        }
    }

    #[test]
    fn subtract_partitions_the_range(a in arbitrary_range(), b in arbitrary_range()) {
        let pieces = a.subtract(&b);

        for piece in &pieces {
            prop_assert!(!piece.is_empty());
            prop_assert!(piece.start_line_number >= a.start_line_number);
            prop_assert!(piece.end_line_number_exclusive <= a.end_line_number_exclusive);
        }

        // Every line of `a` is either in `b` or in exactly one piece.
        for line in 1u32..70 {
            let in_pieces = pieces.iter().filter(|p| p.contains(line)).count();
            prop_assert!(in_pieces <= 1);
            let expected = a.contains(line) && !b.contains(line);
            prop_assert_eq!(in_pieces == 1, expected);
        }
    }

    #[test]
    fn union_and_intersection_are_dual(
        lists_a in prop::collection::vec(arbitrary_range(), 0..10),
        lists_b in prop::collection::vec(arbitrary_range(), 0..10),
    ) {
        let mut a = LineRangeSet::new();
        for r in &lists_a { a.add_range(*r); }
        let mut b = LineRangeSet::new();
        for r in &lists_b { b.add_range(*r); }

        let union = a.get_union(&b);
        let intersection = a.get_intersection(&b);

        for line in 1u32..70 {
            prop_assert_eq!(union.contains(line), a.contains(line) || b.contains(line));
            prop_assert_eq!(intersection.contains(line), a.contains(line) && b.contains(line));
        }
    }
}
