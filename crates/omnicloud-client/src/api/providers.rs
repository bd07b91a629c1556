// Providers and regions only expose the generic CRUD operations

use crate::model::{Provider, Region};
use crate::resource::{Resource, ResourceClient};

impl Resource for Provider {
    const PATH: &'static str = "providers";
    const COLLECTION_KEY: &'static str = "providers";
}

impl Resource for Region {
    const PATH: &'static str = "regions";
    const COLLECTION_KEY: &'static str = "regions";
}

pub type ProvidersApi = ResourceClient<Provider>;

pub type RegionsApi = ResourceClient<Region>;
