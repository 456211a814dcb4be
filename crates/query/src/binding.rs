//! Declarative parameter binding.
//!
//! Each query type declares a `const` table of [`ParamBinding`]s, one per
//! accepted external parameter, and the generic [`bind_parameters`] walk
//! populates a fresh holder from a raw parameter map. The table is built
//! once at compile time; nothing is constructed per request beyond the
//! holder itself.

use crate::convert::ConvertError;
use crate::error::{QueryError, QueryResult};
use crate::params::RequestParams;

/// Declares how one external parameter binds onto a query holder.
///
/// `apply` receives every raw value of the parameter (in arrival order),
/// converts, and assigns into its target field. It is only invoked when
/// the parameter is present.
pub struct ParamBinding<D> {
    /// The external parameter name.
    pub name: &'static str,

    /// Converts the raw values and assigns the target field.
    pub apply: fn(&mut D, &[String]) -> Result<(), ConvertError>,
}

impl<D> std::fmt::Debug for ParamBinding<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamBinding").field("name", &self.name).finish()
    }
}

/// Populates a query holder from raw parameters.
///
/// Every declared parameter that is present is converted and assigned;
/// absent ones leave their field unset. Parameters nothing declares are
/// ignored, so callers may send newer or unrelated parameters without
/// breaking. The first conversion failure aborts the bind; no partially
/// populated holder is returned.
pub fn bind_parameters<D: Default>(
    bindings: &[ParamBinding<D>],
    params: &RequestParams,
) -> QueryResult<D> {
    let mut holder = D::default();
    for binding in bindings {
        if let Some(values) = params.get(binding.name) {
            (binding.apply)(&mut holder, values).map_err(|source| {
                QueryError::InvalidParameter {
                    parameter: binding.name.to_string(),
                    source,
                }
            })?;
        }
    }
    Ok(holder)
}
