pub(crate) mod archive;
pub(crate) mod composite;
pub(crate) mod crop;
pub(crate) mod encode;
pub(crate) mod pipeline;
pub(crate) mod request;
