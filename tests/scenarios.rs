use pretty_assertions::assert_eq;

use podder::{Model, Podder, PodderError, podder};

#[test]
fn fill_with_positive_stride() {
    let v: Podder<u8> = Podder::from_fill(15, 0, 1);
    let expected: Vec<u8> = (0..15).collect();
    assert_eq!(v.as_slice(), expected.as_slice());
    assert_eq!(v.is_small(), 15 <= <Podder<u8>>::inline_capacity());
}

#[test]
fn fill_with_negative_stride_wraps() {
    let v: Podder<i8> = Podder::from_fill(23, 0, -3);
    let expected: Vec<i8> = (0..23).map(|i: i32| (i * -3) as i8).collect();
    assert_eq!(v.as_slice(), expected.as_slice());
    assert_eq!(v[22], (-66i32) as i8);
    assert_eq!(v.len(), 23);
}

#[test]
fn insert_copies_at_front() {
    let mut v: Podder<i32> = (1..=9).collect();
    let before: i32 = v.iter().sum();
    v.insert_n(0, 4, 1);
    assert_eq!(v.as_slice(), &[1, 1, 1, 1, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(v.iter().sum::<i32>(), before + 4);
}

#[test]
fn strict_prefix_is_neither_less_greater_nor_equal() {
    let short: Podder<i32> = podder![1, 2, 3, 4];
    let long: Podder<i32> = podder![1, 2, 3, 4, 5, 6, 7];
    assert!(!(short == long));
    assert!(!(short < long));
    assert!(!(short > long));
    assert!(!(long < short));
    assert!(!(long > short));
}

#[test]
fn assign_large_then_small_folds_back() {
    let mut v: Podder<u32> = podder![1, 2, 3];
    assert_eq!(v.model(), Model::Small);

    let sixteen: Vec<u32> = (100..116).collect();
    v.assign_from_slice(&sixteen);
    assert_eq!(v.model(), Model::Medium);
    assert_eq!(v.as_slice(), sixteen.as_slice());

    v.assign_from_slice(&[9, 8, 7, 6]);
    assert_eq!(v.model(), Model::Small);
    assert_eq!(v.as_slice(), &[9, 8, 7, 6]);
}

#[test]
fn clear_twice() {
    let mut v: Podder<u64> = (0..50).collect();
    v.clear();
    v.clear();
    assert_eq!(v.len(), 0);
    assert!(v.is_empty());
}

#[test]
fn at_reports_index_and_size() {
    let v: Podder<u16> = podder![5, 6, 7];
    assert_eq!(v.at(0), Ok(&5));
    let err = v.at(3).unwrap_err();
    assert_eq!(err, PodderError::OutOfRange { index: 3, len: 3 });
    assert_eq!(err.to_string(), "index out of bounds, pos = 3, size = 3.");
}

#[test]
fn at_mut_writes_through() {
    let mut v: Podder<u16> = podder![0; 40];
    *v.at_mut(39).unwrap() = 1;
    assert_eq!(v.back(), Some(&1));
    assert!(v.at_mut(40).is_err());
}

#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct Point {
    x: f32,
    y: f32,
}

#[test]
fn user_defined_pod_records() {
    let mut v: Podder<Point> = Podder::new();
    for i in 0..10 {
        v.push_back(Point {
            x: i as f32,
            y: -(i as f32),
        });
    }
    assert_eq!(v.model(), Model::Medium);
    v.erase(0);
    assert_eq!(v.front(), Some(&Point { x: 1.0, y: -1.0 }));
    assert_eq!(v.unordered_erase(&Point { x: 5.0, y: -5.0 }), 1);
    assert_eq!(v.len(), 8);
}

#[test]
fn over_aligned_types_are_never_small() {
    #[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
    #[repr(C, align(16))]
    struct Aligned([u8; 16]);

    assert_eq!(<Podder<Aligned>>::inline_capacity(), 0);
    let mut v: Podder<Aligned> = Podder::new();
    assert_eq!(v.model(), Model::Medium);
    v.push_back(Aligned([1; 16]));
    assert_eq!(v.as_ptr() as usize % 16, 0);
    v.assign_from_slice(&[]);
    assert_eq!(v.model(), Model::Medium);
}
