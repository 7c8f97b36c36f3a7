//! The QR decomposition decomposes a matrix $A$ into the product
//! $$A = QR,$$
//! where $Q$ is a unitary matrix (represented as a sequence of Householder reflectors), and $R$
//! is an upper trapezoidal matrix.

pub mod apply;
pub mod compute;
pub mod reconstruct;
