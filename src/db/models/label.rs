use diesel::prelude::*;
use serde::Serialize;

/// Label name and color used to annotate chart legends.
#[derive(Queryable, Serialize, Clone, Debug, PartialEq)]
pub struct LabelColor {
    pub name: String,
    pub color: String,
}
