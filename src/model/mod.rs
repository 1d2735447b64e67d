//! Pure data structures. [`Product`] and [`Order`] implement
//! [`ActorEntity`](actor_framework::ActorEntity); the view types are what callers render.

pub mod customer;
pub mod order;
pub mod product;
pub mod status;
pub mod view;

pub use customer::*;
pub use order::*;
pub use product::*;
pub use status::*;
pub use view::*;
