//! Surface patch connectivity

use crate::error::Result;
use crate::messages::{MessageKey, format_message};
use crate::model::{Geometry, SurfacePatch};
use crate::polygon_union::union_patches;

use super::CheckContext;

/// Check that every multi-patch surface under `geometry` is connected
///
/// A surface with more than one patch is connected iff the planar union of
/// its patches is a single polygon. Each disconnected surface records one
/// error. Solids are not visited and always yield `false`. Collections are
/// connected iff all members are; the first failing member ends the check.
///
/// # Errors
///
/// Fails if the patches of a surface cannot be unioned, in particular with
/// [`crate::Error::NotPolygonal`] for surfaces with patches other than
/// polygon patches.
pub fn check_polygon_patch_connectivity(
    geometry: &Geometry,
    ctx: &mut CheckContext,
) -> Result<bool> {
    match geometry {
        Geometry::Surface(surface) => {
            if surface.patches.len() <= 1 {
                return Ok(true);
            }

            let patches: Vec<&SurfacePatch> = surface.patches.iter().collect();
            if union_patches(&patches)?.is_polygon() {
                Ok(true)
            } else {
                let id = ctx.resolve_id(geometry.id());
                ctx.sink.add_error(
                    format_message(MessageKey::SurfacePatchesNotConnected, &[id.as_str()]),
                    Some(id),
                );
                Ok(false)
            }
        }
        Geometry::Solid(_) | Geometry::MultiSolid(_) | Geometry::CompositeSolid(_) => Ok(false),
        Geometry::MultiGeometry(collection) | Geometry::CompositeGeometry(collection) => {
            for member in &collection.members {
                if !check_polygon_patch_connectivity(member, ctx)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Geometry::Point(_) | Geometry::Curve(_) => Ok(true),
    }
}
