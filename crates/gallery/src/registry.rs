//! Entity registry: every placed scene object, plus the ordered pickable set.

use engine_core::{Entity, FocalObject, Interaction, Material, ProjectRecord, Shape, Transform, World};
use glam::{Vec2, Vec3};
use picking::Bounds;
use renderer::{RenderBackend, RenderHandle};

/// Billboard quad size and mounting height (bottom edge on the ground).
pub const BILLBOARD_WIDTH: f32 = 3.0;
pub const BILLBOARD_HEIGHT: f32 = 3.5;

/// Owns scene entities. Pickable entities are additionally tracked in
/// insertion order, which is the tie-break order for picking.
#[derive(Default)]
pub struct EntityRegistry {
    world: World,
    pickable: Vec<Entity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn spawn(
        &mut self,
        shape: Shape,
        material: &Material,
        transform: Transform,
        interaction: Interaction,
        backend: &mut dyn RenderBackend,
    ) -> Entity {
        let handle = backend.create_entity(&shape, material, &transform);
        self.world.spawn((transform, shape, interaction, handle))
    }

    /// Place ground or scenery. Never pickable.
    pub fn spawn_decorative(
        &mut self,
        shape: Shape,
        material: &Material,
        transform: Transform,
        backend: &mut dyn RenderBackend,
    ) -> Entity {
        self.spawn(shape, material, transform, Interaction::Decorative, backend)
    }

    /// Place the object the motion controller drives.
    pub fn spawn_focal(
        &mut self,
        shape: Shape,
        material: &Material,
        transform: Transform,
        backend: &mut dyn RenderBackend,
    ) -> Entity {
        let entity = self.spawn(shape, material, transform, Interaction::Decorative, backend);
        // Entity was just spawned, insert cannot fail.
        let _ = self.world.insert_one(entity, FocalObject);
        entity
    }

    /// Register one billboard per record at the given ground positions.
    ///
    /// The whole batch is inserted within this call, so no pick or frame can
    /// observe part of it. Records beyond the supplied positions are dropped.
    pub fn apply_batch(
        &mut self,
        records: Vec<ProjectRecord>,
        positions: &[Vec2],
        backend: &mut dyn RenderBackend,
    ) -> Vec<Entity> {
        if records.len() > positions.len() {
            log::warn!(
                "{} project records but only {} positions; extra records dropped",
                records.len(),
                positions.len()
            );
        }
        let shape = Shape::Quad {
            width: BILLBOARD_WIDTH,
            height: BILLBOARD_HEIGHT,
        };
        let mut added = Vec::with_capacity(records.len().min(positions.len()));
        for (record, ground) in records.into_iter().zip(positions) {
            if !record.has_title() {
                log::warn!("project record without a title (image {:?}) will not open the overlay", record.image);
            }
            let material = Material::textured(record.image.clone());
            let transform = Transform::from_position(Vec3::new(ground.x, BILLBOARD_HEIGHT * 0.5, ground.y));
            let entity = self.spawn(shape, &material, transform, Interaction::Pickable(record), backend);
            added.push(entity);
        }
        self.pickable.extend_from_slice(&added);
        added
    }

    /// Pickable entities with their world-space bounds, in insertion order.
    pub fn pickable_candidates(&self) -> Vec<(Entity, Bounds)> {
        self.pickable
            .iter()
            .filter_map(|&entity| {
                let transform = self.world.get::<&Transform>(entity).ok()?;
                let shape = self.world.get::<&Shape>(entity).ok()?;
                Some((entity, Bounds::from_shape(&shape, &transform)))
            })
            .collect()
    }

    /// Entities in the pickable set, in insertion order.
    pub fn pickable(&self) -> &[Entity] {
        &self.pickable
    }

    pub fn pickable_len(&self) -> usize {
        self.pickable.len()
    }

    /// Number of entities of every kind.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    /// Project record of a pickable entity.
    pub fn record(&self, entity: Entity) -> Option<ProjectRecord> {
        let interaction = self.world.get::<&Interaction>(entity).ok()?;
        interaction.record().cloned()
    }

    /// Whether `entity` carries a record with a non-blank title.
    pub fn has_titled_record(&self, entity: Entity) -> bool {
        self.world
            .get::<&Interaction>(entity)
            .map(|i| i.record().is_some_and(ProjectRecord::has_title))
            .unwrap_or(false)
    }

    pub fn is_pickable(&self, entity: Entity) -> bool {
        self.world
            .get::<&Interaction>(entity)
            .map(|i| matches!(*i, Interaction::Pickable(_)))
            .unwrap_or(false)
    }

    pub fn transform(&self, entity: Entity) -> Option<Transform> {
        self.world.get::<&Transform>(entity).ok().map(|t| *t)
    }

    /// Move an entity and mirror the change to the render backend.
    pub fn set_position(&mut self, entity: Entity, position: Vec3, backend: &mut dyn RenderBackend) {
        let Ok((transform, handle)) = self
            .world
            .query_one_mut::<(&mut Transform, &RenderHandle)>(entity)
        else {
            log::warn!("set_position on missing entity {:?}", entity);
            return;
        };
        transform.position = position;
        if let Err(e) = backend.set_transform(*handle, transform) {
            log::warn!("render backend rejected transform for {:?}: {}", entity, e);
        }
    }

    /// Entities carrying the focal tag.
    pub fn focal_entities(&self) -> Vec<Entity> {
        self.world
            .query::<&FocalObject>()
            .iter()
            .map(|(entity, _)| entity)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::HeadlessBackend;

    fn records(titles: &[&str]) -> Vec<ProjectRecord> {
        titles
            .iter()
            .map(|t| ProjectRecord::new(*t, "d", format!("{t}.png")))
            .collect()
    }

    #[test]
    fn decorative_entities_are_not_pickable() {
        let mut backend = HeadlessBackend::new();
        let mut registry = EntityRegistry::new();
        let tree = registry.spawn_decorative(
            Shape::Cone { radius: 1.0, height: 4.0 },
            &Material::lambert(0x226622),
            Transform::from_position(Vec3::new(0.0, 2.0, 0.0)),
            &mut backend,
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.pickable_len(), 0);
        assert!(!registry.is_pickable(tree));
        assert!(registry.record(tree).is_none());
        assert!(registry.pickable_candidates().is_empty());
    }

    #[test]
    fn batch_keeps_insertion_order_and_records() {
        let mut backend = HeadlessBackend::new();
        let mut registry = EntityRegistry::new();
        let positions = [Vec2::new(1.0, 2.0), Vec2::new(-3.0, 4.0), Vec2::new(5.0, -6.0)];
        let added = registry.apply_batch(records(&["A", "B", "C"]), &positions, &mut backend);

        assert_eq!(added.len(), 3);
        assert_eq!(registry.pickable(), added.as_slice());
        assert!(added.iter().all(|e| registry.has_titled_record(*e)));
        assert_eq!(backend.instance_count(), 3);
        let titles: Vec<_> = added
            .iter()
            .map(|e| registry.record(*e).unwrap().title)
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);

        let t = registry.transform(added[1]).unwrap();
        assert_eq!(t.position, Vec3::new(-3.0, BILLBOARD_HEIGHT * 0.5, 4.0));
        let candidates = registry.pickable_candidates();
        assert_eq!(candidates.iter().map(|(e, _)| *e).collect::<Vec<_>>(), added);
    }

    #[test]
    fn untitled_records_still_register() {
        let mut backend = HeadlessBackend::new();
        let mut registry = EntityRegistry::new();
        let added = registry.apply_batch(records(&[""]), &[Vec2::ZERO], &mut backend);
        assert_eq!(registry.pickable_len(), 1);
        assert!(registry.is_pickable(added[0]));
        assert!(!registry.has_titled_record(added[0]));
        assert_eq!(registry.pickable_candidates().len(), 1);
    }

    #[test]
    fn empty_batch_changes_nothing() {
        let mut backend = HeadlessBackend::new();
        let mut registry = EntityRegistry::new();
        assert!(registry.apply_batch(Vec::new(), &[], &mut backend).is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn set_position_reaches_backend() {
        let mut backend = HeadlessBackend::new();
        let mut registry = EntityRegistry::new();
        let ball = registry.spawn_focal(
            Shape::Sphere { radius: 1.0 },
            &Material::standard(0xffffff),
            Transform::from_position(Vec3::Y),
            &mut backend,
        );
        registry.set_position(ball, Vec3::new(3.0, 1.0, 4.0), &mut backend);
        assert_eq!(registry.transform(ball).unwrap().position, Vec3::new(3.0, 1.0, 4.0));
        assert_eq!(
            backend.transform(RenderHandle(0)).unwrap().position,
            Vec3::new(3.0, 1.0, 4.0)
        );
        assert_eq!(registry.focal_entities(), vec![ball]);
    }
}
