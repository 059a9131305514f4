//! Property registry, declarations, specified and computed values.

mod computed;
mod declaration;
mod properties;
mod shorthand;
mod specified;

pub use computed::{ComputedStyle, ComputedValue};
pub use declaration::{PropertyDeclaration, is_known_property};
pub use properties::{PropertyId, PropertyInfo, ValueKind};
pub use shorthand::longhands as shorthand_longhands;
pub use specified::{BORDER_STYLES, SpecifiedValue, initial_value, parse_color};
