use rand::{
  thread_rng,
  Rng,
};
use rand_distr::StandardNormal;
use num_complex::{
  Complex32,
  Complex64,
};

// Random buffers for tests.
pub(crate) trait BufferGenerator: Sized {
  fn random_normal(size: usize) -> Vec<Self>;
}

macro_rules! float_buffer_generator_impl
{
  ($type:ty) => {
    impl BufferGenerator for $type
    {
      fn random_normal(size: usize) -> Vec<Self> {
        let mut rng = thread_rng();
        (0..size).map(|_| rng.sample::<$type, _>(StandardNormal)).collect()
      }
    }
  };
}

float_buffer_generator_impl!(f32);
float_buffer_generator_impl!(f64);

macro_rules! complex_buffer_generator_impl
{
  ($type:ty, $real_type:ty) => {
    impl BufferGenerator for $type
    {
      fn random_normal(size: usize) -> Vec<Self> {
        let mut rng = thread_rng();
        (0..size).map(|_| {
          <$type>::new(
            rng.sample::<$real_type, _>(StandardNormal),
            rng.sample::<$real_type, _>(StandardNormal),
          )
        }).collect()
      }
    }
  };
}

complex_buffer_generator_impl!(Complex32, f32);
complex_buffer_generator_impl!(Complex64, f64);

/// Random zero-based indices below `bound`.
pub(crate) fn random_indices(size: usize, bound: usize) -> Vec<usize> {
  let mut rng = thread_rng();
  (0..size).map(|_| rng.gen_range(0..bound)).collect()
}
