pub mod markup;
pub mod observe;
pub mod state;
pub mod timing;
