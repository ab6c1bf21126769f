// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod buckets;
pub mod coach;
pub mod model;
pub mod state;

pub use buckets::*;
pub use coach::*;
pub use model::*;
pub use state::*;
