#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use t3d_tensor as tensor;

#[doc(inline)]
pub use t3d_linalg as linalg;

#[doc(inline)]
pub use t3d_registration as registration;
