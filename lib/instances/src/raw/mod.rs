pub mod cvrp;


pub mod metrics {
  use num_traits::{AsPrimitive, Num};
  use itertools::Itertools;

  pub trait Metric {
    fn compute<T: Num + AsPrimitive<f64>>(p1: (T, T), p2: (T, T)) -> f64;
  }


  pub struct Euclidean();

  impl Metric for Euclidean {
    fn compute<T: Num + AsPrimitive<f64>>(p1: (T, T), p2: (T, T)) -> f64 {
      let a = p1.0.as_() - p2.0.as_();
      let b = p1.1.as_() - p2.1.as_();
      (a*a + b*b).sqrt()
    }
  }

  /// Sum of the distances between consecutive points of `path`.
  pub fn path_length<M, T>(_metric: M, path: &[(T, T)]) -> f64
    where
      M: Metric,
      T: Num + AsPrimitive<f64>
  {
    path.iter()
      .tuple_windows()
      .map(|(&p1, &p2)| M::compute(p1, p2))
      .sum()
  }

}
