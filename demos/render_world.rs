//! The fixed render-world walkthrough: three meshes, remove the middle one, and check that the
//! survivors are still reachable through their handles while storage stays gap-free.
//!
//! Run with `RUST_LOG=trace cargo run --example render_world` to watch handles move.

use dense_registry::{Handle, Registry};

type MeshId = Handle<Mesh>;

// A real mesh would hold vertex and index buffers. The dummy field is only there to check that
// handles keep pointing at the right instance.
#[derive(Copy, Clone, Debug, Default)]
struct Mesh {
    dummy: i32,
}

// The world owns every mesh. Everything else only ever holds a MeshId.
struct RenderWorld {
    meshes: Registry<Mesh>,
}

impl RenderWorld {
    fn new() -> Self {
        Self {
            meshes: Registry::new(),
        }
    }

    fn add_mesh(&mut self) -> MeshId {
        self.meshes.insert(Mesh::default())
    }

    fn remove_mesh(&mut self, id: MeshId) {
        if let Err(error) = self.meshes.remove(id) {
            log::warn!("can't remove {:?}: {}", id, error);
        }
    }

    fn lookup(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.get_mut(id)
    }

    fn iterate(&self) {
        for (i, mesh) in self.meshes.as_slice().iter().enumerate() {
            println!("Mesh instance {}: dummy = {}", i, mesh.dummy);
        }
    }
}

fn main() {
    env_logger::init();

    let mut world = RenderWorld::new();
    let mesh_id0 = world.add_mesh();
    let mesh_id1 = world.add_mesh();
    let mesh_id2 = world.add_mesh();

    for (id, dummy) in [(mesh_id0, 0), (mesh_id1, 1), (mesh_id2, 2)] {
        if let Some(mesh) = world.lookup(id) {
            mesh.dummy = dummy;
        }
    }

    // [Mesh][Mesh][Mesh]
    world.iterate();

    // Removing the middle mesh would leave [Mesh][Empty][Mesh]. The last mesh fills the gap.
    world.remove_mesh(mesh_id1);
    world.iterate();

    assert_eq!(world.lookup(mesh_id0).map(|mesh| mesh.dummy), Some(0));
    assert_eq!(world.lookup(mesh_id2).map(|mesh| mesh.dummy), Some(2));

    // The removed mesh is gone, and looking it up says so instead of aliasing mesh 2.
    assert!(world.lookup(mesh_id1).is_none());
    log::info!("{:?} no longer resolves", mesh_id1);

    // Removing it again is reported, not silently corrupting the world.
    world.remove_mesh(mesh_id1);
}
