use std::{cmp::Ordering, fmt, marker::PhantomData};

use rand::{
    Rng as _,
    distr::{Alphanumeric, Distribution, SampleString as _},
    rngs::StdRng,
};

/// An element that can be sorted, not necessarily totally ordered
pub trait Element: Clone + fmt::Debug {
    /// Whether `self` has to be placed before `other`
    fn is_less(&self, other: &Self) -> bool;

    /// The [`Ordering`] induced by [`Element::is_less`]
    fn compare(&self, other: &Self) -> Ordering {
        if self.is_less(other) {
            Ordering::Less
        } else if other.is_less(self) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

macro_rules! impl_element_for_ord {
    ($($type:ty),*) => {
        $(
            impl Element for $type {
                fn is_less(&self, other: &Self) -> bool {
                    self < other
                }
            }
        )*
    };
}

impl_element_for_ord!(u32, u64, String);

impl Element for f64 {
    fn is_less(&self, other: &Self) -> bool {
        self < other
    }
}

/// The point every [`Point`] is compared by its distance to
pub const PIVOT: Point = Point {
    x: 7.35e3,
    y: 1.194e2,
    z: 6.832e-2,
};

/// A point in space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    /// The squared euclidean distance to `other`
    pub fn distance_squared(&self, other: &Point) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2)
    }
}

impl Element for Point {
    fn is_less(&self, other: &Self) -> bool {
        self.distance_squared(&PIVOT) < other.distance_squared(&PIVOT)
    }
}

/// A trait for generalizing sorting data creation
pub trait Data<T: Element> {
    /// Initialize a vector of the given size
    fn initialize(size: usize, rng: &mut StdRng) -> Vec<T>;
}

/// A uniform data distribution set
#[derive(Debug)]
pub struct UniformData<T>(PhantomData<T>);

macro_rules! impl_for_integers {
    ($($type:ty),*) => {
        $(
            impl_for_integers!(@single $type);
        )*
    };
    (@single $type:ty) => {
        impl Data<$type> for UniformData<$type> {
            fn initialize(size: usize, rng: &mut StdRng) -> Vec<$type> {
                rand::distr::Uniform::new_inclusive(<$type>::MIN, <$type>::MAX)
                    .unwrap()
                    .sample_iter(rng)
                    .take(size)
                    .collect()
            }
        }
    }
}

impl_for_integers!(u32, u64);

/// Normally distributed floating point numbers
#[derive(Debug)]
pub struct NormalData;

/// Standard deviation of [`NormalData`]
pub const NORMAL_STD_DEV: f64 = 1.0e6;

impl Data<f64> for NormalData {
    fn initialize(size: usize, rng: &mut StdRng) -> Vec<f64> {
        rand_distr::Normal::new(0.0, NORMAL_STD_DEV)
            .unwrap()
            .sample_iter(rng)
            .take(size)
            .collect()
    }
}

/// Alphanumeric strings of random length
#[derive(Debug)]
pub struct StringData;

/// Maximum length of a string of [`StringData`]
pub const MAX_STRING_LENGTH: usize = 64;

impl Data<String> for StringData {
    fn initialize(size: usize, rng: &mut StdRng) -> Vec<String> {
        std::iter::repeat_with(|| {
            let length = rng.random_range(0..=MAX_STRING_LENGTH);
            Alphanumeric.sample_string(rng, length)
        })
        .take(size)
        .collect()
    }
}

/// Points with coordinates scaled down by a random power of `0.9`
#[derive(Debug)]
pub struct PointData;

impl PointData {
    fn coordinate(rng: &mut StdRng) -> f64 {
        let raw: u16 = rng.random();
        f64::from(raw) * 0.9f64.powi(i32::from(raw & 0xF))
    }
}

impl Data<Point> for PointData {
    fn initialize(size: usize, rng: &mut StdRng) -> Vec<Point> {
        std::iter::repeat_with(|| Point {
            x: Self::coordinate(rng),
            y: Self::coordinate(rng),
            z: Self::coordinate(rng),
        })
        .take(size)
        .collect()
    }
}

/// Sort every chunk of `run_length` elements, turning `values` into a sequence of presorted runs
pub fn presort_runs<T: Element>(values: &mut [T], run_length: usize) {
    for run in values.chunks_mut(run_length.max(1)) {
        run.sort_by(T::compare);
    }
}

/// The storage the data is sorted in
#[derive(Debug)]
pub enum Container<T> {
    Array(Box<[T]>),
    Vector(Vec<T>),
}

impl<T> Container<T> {
    /// Move `values` into a container of the given kind
    pub fn new(kind: crate::cli::ContainerKind, values: Vec<T>) -> Self {
        match kind {
            crate::cli::ContainerKind::Array => Container::Array(values.into_boxed_slice()),
            crate::cli::ContainerKind::Vector => Container::Vector(values),
        }
    }

    /// The contained elements
    pub fn as_slice(&self) -> &[T] {
        match self {
            Container::Array(values) => values,
            Container::Vector(values) => values,
        }
    }

    /// The contained elements, mutably
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            Container::Array(values) => values,
            Container::Vector(values) => values,
        }
    }
}

/// Returns every index `i` with `slice[i + 1]` ordered before `slice[i]`
pub fn crash_indices<T: Element>(slice: &[T]) -> Vec<usize> {
    slice
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[1].is_less(&pair[0]))
        .map(|(index, _)| index)
        .collect()
}
