/*!
Static map geometry.

Every primitive is immutable once placed in the [`crate::world::World`]:

- types:     math aliases, axes and materials
- floor:     horizontal walkable rectangles
- wall:      vertical blocking rectangles
- solid_box: axis-aligned solids (four wall faces plus a walkable top)
- ramp:      stepped staircases
- surface:   the closed `Geometry` set plus borrowed `SolidSurface` and `SurfaceRef` views
*/

pub mod floor;
pub mod ramp;
pub mod solid_box;
pub mod surface;
pub mod types;
pub mod wall;

pub use floor::Floor;
pub use ramp::{Heading, Ramp};
pub use solid_box::SolidBox;
pub use surface::{
    Geometry, RayContact, SolidSurface, SurfaceDescriptor, SurfaceKind, SurfaceRef,
};
pub use types::{Axis, Iso, Material, Point3, Vec3};
pub use wall::Wall;
