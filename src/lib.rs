#![doc = "Weighted rectilinear facility location on an integer grid"]
pub mod field;
pub mod io;
pub mod model;
pub mod site;

#[doc(inline)]
pub use site::Site;

#[doc(inline)]
pub use field::{Field, FieldCell, FieldError, RawCell};

#[doc(inline)]
pub use model::{FacilityPlan, ModelError, SingleFacilityModel, TwoFacilityModel};

#[doc(inline)]
pub use io::svg::RenderOptions;
