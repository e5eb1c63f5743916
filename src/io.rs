//! JSON instance source.
//!
//! Reads an [`Instance`] from its serde JSON form:
//!
//! ```json
//! {
//!   "name": "small_01",
//!   "supply": [20, 30],
//!   "demand": [10, 25, 15],
//!   "cost": [[8, 6, 10], [9, 12, 13]],
//!   "fixed_cost": {"per_source": [100, 80]}
//! }
//! ```
//!
//! `fixed_cost` may be omitted, `"none"`, `{"per_source": [...]}`, or
//! `{"per_route": [[...], ...]}`.

use std::io::Read;

use crate::error::ParseError;
use crate::models::Instance;

/// Reads and shape-checks an instance from a JSON reader.
///
/// Balance is not checked here; solvers reject unbalanced instances.
pub fn read_instance_json<R: Read>(reader: R) -> Result<Instance, ParseError> {
    let instance: Instance = serde_json::from_reader(reader)?;
    instance.validate_shape()?;
    Ok(instance)
}

/// Parses and shape-checks an instance from a JSON string.
///
/// # Examples
///
/// ```
/// use u_transport::io::instance_from_json_str;
///
/// let json = r#"{"name": "t", "supply": [3], "demand": [1, 2], "cost": [[4, 5]]}"#;
/// let instance = instance_from_json_str(json).unwrap();
/// assert_eq!(instance.num_sinks(), 2);
/// assert_eq!(instance.cost().get(0, 1), 5.0);
/// ```
pub fn instance_from_json_str(json: &str) -> Result<Instance, ParseError> {
    read_instance_json(json.as_bytes())
}
