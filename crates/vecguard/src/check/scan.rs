//! Finite-value scanning over numeric payloads.

use crate::env::{Action, EnvInfo, Observation};
use ndarray::{ArrayBase, Data, Dimension};
use std::collections::HashMap;

/// Capability of a payload to report whether it holds NaN or infinite values.
///
/// Implemented once per container type; containers delegate to their
/// elements, so arbitrarily nested payloads scan without any special casing.
pub trait FiniteScan {
    /// True if any value is NaN
    fn has_nan(&self) -> bool;

    /// True if any value is `+inf` or `-inf`
    fn has_inf(&self) -> bool;
}

macro_rules! impl_float {
    ($($t:ty),*) => {$(
        impl FiniteScan for $t {
            fn has_nan(&self) -> bool {
                self.is_nan()
            }

            fn has_inf(&self) -> bool {
                self.is_infinite()
            }
        }
    )*};
}

macro_rules! impl_always_finite {
    ($($t:ty),*) => {$(
        impl FiniteScan for $t {
            fn has_nan(&self) -> bool {
                false
            }

            fn has_inf(&self) -> bool {
                false
            }
        }
    )*};
}

impl_float!(f32, f64);
impl_always_finite!(bool, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl<T: FiniteScan> FiniteScan for [T] {
    fn has_nan(&self) -> bool {
        self.iter().any(FiniteScan::has_nan)
    }

    fn has_inf(&self) -> bool {
        self.iter().any(FiniteScan::has_inf)
    }
}

impl<T: FiniteScan, const N: usize> FiniteScan for [T; N] {
    fn has_nan(&self) -> bool {
        self.as_slice().has_nan()
    }

    fn has_inf(&self) -> bool {
        self.as_slice().has_inf()
    }
}

impl<T: FiniteScan> FiniteScan for Vec<T> {
    fn has_nan(&self) -> bool {
        self.as_slice().has_nan()
    }

    fn has_inf(&self) -> bool {
        self.as_slice().has_inf()
    }
}

impl<T: FiniteScan> FiniteScan for Option<T> {
    fn has_nan(&self) -> bool {
        self.as_ref().is_some_and(FiniteScan::has_nan)
    }

    fn has_inf(&self) -> bool {
        self.as_ref().is_some_and(FiniteScan::has_inf)
    }
}

impl<T: FiniteScan + ?Sized> FiniteScan for Box<T> {
    fn has_nan(&self) -> bool {
        (**self).has_nan()
    }

    fn has_inf(&self) -> bool {
        (**self).has_inf()
    }
}

impl<T: FiniteScan + ?Sized> FiniteScan for &T {
    fn has_nan(&self) -> bool {
        (**self).has_nan()
    }

    fn has_inf(&self) -> bool {
        (**self).has_inf()
    }
}

impl<A: FiniteScan, B: FiniteScan> FiniteScan for (A, B) {
    fn has_nan(&self) -> bool {
        self.0.has_nan() || self.1.has_nan()
    }

    fn has_inf(&self) -> bool {
        self.0.has_inf() || self.1.has_inf()
    }
}

impl<K, V: FiniteScan, H> FiniteScan for HashMap<K, V, H> {
    fn has_nan(&self) -> bool {
        self.values().any(FiniteScan::has_nan)
    }

    fn has_inf(&self) -> bool {
        self.values().any(FiniteScan::has_inf)
    }
}

impl<A, S, D> FiniteScan for ArrayBase<S, D>
where
    A: FiniteScan,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn has_nan(&self) -> bool {
        self.iter().any(FiniteScan::has_nan)
    }

    fn has_inf(&self) -> bool {
        self.iter().any(FiniteScan::has_inf)
    }
}

impl FiniteScan for EnvInfo {
    fn has_nan(&self) -> bool {
        self.values().any(|v| v.is_nan())
    }

    fn has_inf(&self) -> bool {
        self.values().any(|v| v.is_infinite())
    }
}

impl FiniteScan for Observation {
    fn has_nan(&self) -> bool {
        match self {
            Observation::Array(a) => a.has_nan(),
            Observation::Dict(d) => d.has_nan(),
            Observation::Tuple(t) => t.has_nan(),
        }
    }

    fn has_inf(&self) -> bool {
        match self {
            Observation::Array(a) => a.has_inf(),
            Observation::Dict(d) => d.has_inf(),
            Observation::Tuple(t) => t.has_inf(),
        }
    }
}

impl FiniteScan for Action {
    fn has_nan(&self) -> bool {
        match self {
            Action::Array(a) => a.has_nan(),
            Action::Dict(d) => d.has_nan(),
            Action::Tuple(t) => t.has_nan(),
        }
    }

    fn has_inf(&self) -> bool {
        match self {
            Action::Array(a) => a.has_inf(),
            Action::Dict(d) => d.has_inf(),
            Action::Tuple(t) => t.has_inf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, ArrayD, IxDyn};

    #[test]
    fn test_scalars() {
        assert!(f32::NAN.has_nan());
        assert!(!f32::NAN.has_inf());
        assert!(f64::NEG_INFINITY.has_inf());
        assert!(!1.0f32.has_nan());
        assert!(!7u8.has_nan());
        assert!(!true.has_inf());
    }

    #[test]
    fn test_arrays_of_any_dimension() {
        let clean = arr2(&[[1.0f32, 2.0], [3.0, 4.0]]);
        assert!(!clean.has_nan());
        assert!(!clean.has_inf());

        let mut dirty = ArrayD::<f32>::zeros(IxDyn(&[2, 3, 4]));
        dirty[[1, 2, 3]] = f32::INFINITY;
        assert!(dirty.has_inf());
        assert!(!dirty.has_nan());
        assert!(dirty.view().has_inf());
    }

    #[test]
    fn test_nested_containers() {
        let nested: Vec<Option<[f64; 2]>> = vec![Some([0.0, 1.0]), None, Some([f64::NAN, 0.0])];
        assert!(nested.has_nan());
        assert!(!nested.has_inf());

        let mut map = HashMap::new();
        map.insert("a", vec![1.0f32]);
        map.insert("b", vec![f32::NEG_INFINITY]);
        assert!(map.has_inf());
    }

    #[test]
    fn test_info() {
        assert!(!EnvInfo::new().with_extra("score", 1.0).has_nan());
        assert!(EnvInfo::new().with_extra("score", f32::NAN).has_nan());
        assert!(EnvInfo::new().with_episode_stats(f32::INFINITY, 3).has_inf());
        assert!(vec![EnvInfo::new(), EnvInfo::new().with_extra("x", f32::NAN)].has_nan());
    }

    #[test]
    fn test_structured_observation() {
        let mut dict = HashMap::new();
        dict.insert(
            "pos".to_string(),
            Observation::Array(ArrayD::from_elem(IxDyn(&[2]), 0.5)),
        );
        dict.insert(
            "vel".to_string(),
            Observation::Tuple(vec![Observation::Array(ArrayD::from_elem(
                IxDyn(&[1]),
                f32::NAN,
            ))]),
        );
        let obs = Observation::Dict(dict);
        assert!(obs.has_nan());
        assert!(!obs.has_inf());

        let action = Action::Tuple(vec![Action::Array(ArrayD::from_elem(IxDyn(&[1]), 1.0))]);
        assert!(!action.has_nan());
    }
}
