pub(crate) mod contrast;
pub(crate) mod finish;
pub(crate) mod fonts;
pub(crate) mod layer;
pub(crate) mod pill;
pub(crate) mod sample;
pub(crate) mod text_fit;
