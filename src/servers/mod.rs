//! Server back-ends which bind a listening socket and serve a handler.

pub mod hyper;
