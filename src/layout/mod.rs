pub(crate) mod collision;
pub(crate) mod geometry;
pub(crate) mod mask;
pub(crate) mod model;
pub(crate) mod resolve;
pub(crate) mod settings;
pub(crate) mod settle;
