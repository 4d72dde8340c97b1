// ── Reactive data store ──
//
// One `ResourceStore` per resource type, owned together by `AppState`
// and shared with controllers through `Arc`.

mod reducer;
mod resource_store;

pub use reducer::{Mutation, Slice, reduce};
pub use resource_store::ResourceStore;

use crate::model::{Product, Provider};

/// Application state: the displayed page of every resource.
#[derive(Default)]
pub struct AppState {
    pub products: ResourceStore<Product>,
    pub providers: ResourceStore<Provider>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
