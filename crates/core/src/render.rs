//! Contract the animation pushes marker geometry into.

use geo::Polygon;
use liner_transit::TrainIdentifier;

/// Named geometry store owned by the map.
///
/// Implementations take `&mut self`; callers sharing a sink between tasks
/// must serialize access themselves (a single owning task or a mutex).
pub trait RenderSink {
    fn has_geometry(&self, id: &TrainIdentifier) -> bool;

    /// Create the named geometry and its display layer, or replace only the
    /// geometry data when it already exists.
    fn upsert(&mut self, id: &TrainIdentifier, polygon: &Polygon);

    /// Drop the geometry and its layer. Absent ids are ignored.
    fn remove(&mut self, id: &TrainIdentifier);
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn has_geometry(&self, id: &TrainIdentifier) -> bool {
        (**self).has_geometry(id)
    }

    fn upsert(&mut self, id: &TrainIdentifier, polygon: &Polygon) {
        (**self).upsert(id, polygon)
    }

    fn remove(&mut self, id: &TrainIdentifier) {
        (**self).remove(id)
    }
}
