use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use crate::{
    geometry::primitives::{Bounds3, Box3},
    helpers::aliases::Vec3f,
    tool::{Posture, Tool},
    topology::{Topology, TopologyError},
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn world_box(min: f32, max: f32) -> Box3<f32> {
    Box3::new(Vec3f::new(min, min, min), Vec3f::new(max, max, max))
}

fn sphere_at(center: Vec3f, radius: f32) -> (Box3<f32>, impl Fn(&Vec3f) -> bool + Sync) {
    let bbox = Box3::new(center.add_scalar(-radius), center.add_scalar(radius));
    (bbox, move |p: &Vec3f| (p - center).norm() <= radius)
}

fn total_volume(sizes: &[f32]) -> f64 {
    sizes.iter().map(|s| (*s as f64).powi(3)).sum()
}

#[test]
fn test_initial_harvest_is_root_child_lattice() {
    init_logging();
    let mut topology = Topology::new(1000.0).unwrap();

    let mut coords = Vec::new();
    let mut sizes = Vec::new();
    topology.harvest(&mut coords, &mut sizes);

    assert_eq!(coords.len(), 64);
    assert_eq!(sizes.len(), 64);
    assert!(sizes.iter().all(|s| *s == 0.5));

    for coord in &coords {
        for i in 0..3 {
            let offset = coord[i].abs();
            assert!(offset == 0.25 || offset == 0.75, "off-lattice center {}", coord);
        }
    }

    assert!((total_volume(&sizes) - 8.0).abs() < 1e-4);
}

#[test]
fn test_subtract_everything_leaves_nothing() {
    let mut topology = Topology::new(1000.0).unwrap();
    topology.subtract(&world_box(-500.0, 500.0), |_: &Vec3f| true);

    let mut coords = Vec::new();
    let mut sizes = Vec::new();
    topology.harvest(&mut coords, &mut sizes);

    assert_eq!(coords.len(), 0);
    assert_eq!(sizes.len(), 0);

    let stats = topology.stats();
    assert_eq!(stats.material_voxels, 0);
    assert_eq!(stats.bricks, 0);
}

#[test]
fn test_subtract_subvoxel_sphere_removes_nothing() {
    // A unit sphere is far smaller than one voxel (~1.95 world units), no
    // voxel center falls inside it
    let mut topology = Topology::new(1000.0).unwrap();
    let (bbox, inside) = sphere_at(Vec3f::zeros(), 1.0);
    topology.subtract(&bbox, inside);

    let mut coords = Vec::new();
    let mut sizes = Vec::new();
    topology.harvest(&mut coords, &mut sizes);

    assert!(!coords.is_empty());
    assert!(coords
        .iter()
        .all(|c| topology.from_gl(c).norm() > 1.0));
    assert!((total_volume(&sizes) - 8.0).abs() < 1e-3);
}

#[test]
fn test_subtract_sphere_is_sound_and_complete() {
    let mut topology = Topology::new(1000.0).unwrap();
    let radius = 100.0;
    let (bbox, inside) = sphere_at(Vec3f::zeros(), radius);
    topology.subtract(&bbox, &inside);

    let mut coords = Vec::new();
    let mut sizes = Vec::new();
    topology.harvest(&mut coords, &mut sizes);

    // Soundness: no surviving center inside the tool
    assert!(coords.iter().all(|c| !inside(&topology.from_gl(c))));

    // Completeness: the removed volume is about the sphere volume. The
    // sphere has radius 0.2 in the normalized frame.
    let removed = 8.0 - total_volume(&sizes);
    let sphere_volume = 4.0 / 3.0 * std::f64::consts::PI * 0.2f64.powi(3);

    assert!(removed > sphere_volume * 0.9, "removed too little: {}", removed);
    assert!(removed < sphere_volume * 1.1, "removed too much: {}", removed);
}

#[test]
fn test_subtract_is_idempotent() {
    let mut topology = Topology::new(1000.0).unwrap();
    let (bbox, inside) = sphere_at(Vec3f::new(100.0, -50.0, 200.0), 120.0);

    let mut first_coords = Vec::new();
    let mut first_sizes = Vec::new();
    topology.subtract(&bbox, &inside);
    topology.harvest(&mut first_coords, &mut first_sizes);

    let mut second_coords = Vec::new();
    let mut second_sizes = Vec::new();
    topology.subtract(&bbox, &inside);
    topology.harvest(&mut second_coords, &mut second_sizes);

    assert_eq!(first_coords, second_coords);
    assert_eq!(first_sizes, second_sizes);
}

#[test]
fn test_disjoint_subtracts_commute() {
    let (bbox_a, inside_a) = sphere_at(Vec3f::new(-250.0, 0.0, 0.0), 100.0);
    let (bbox_b, inside_b) = sphere_at(Vec3f::new(250.0, 0.0, 0.0), 100.0);

    let mut forward = Topology::new(1000.0).unwrap();
    forward.subtract(&bbox_a, &inside_a);
    forward.subtract(&bbox_b, &inside_b);

    let mut backward = Topology::new(1000.0).unwrap();
    backward.subtract(&bbox_b, &inside_b);
    backward.subtract(&bbox_a, &inside_a);

    let mut forward_coords = Vec::new();
    let mut forward_sizes = Vec::new();
    forward.harvest(&mut forward_coords, &mut forward_sizes);

    let mut backward_coords = Vec::new();
    let mut backward_sizes = Vec::new();
    backward.harvest(&mut backward_coords, &mut backward_sizes);

    assert_eq!(forward_coords, backward_coords);
    assert_eq!(forward_sizes, backward_sizes);
}

#[test]
fn test_carving_pass_shrinks_monotonically() {
    init_logging();
    let mut topology = Topology::new(1000.0).unwrap();

    let mut tool = Tool::new(50.0, 200.0).with_center_step(10.0);
    tool.push_path(vec![
        Posture::new(Vec3f::new(0.0, 400.0, 450.0), Vec3f::z()),
        Posture::new(Vec3f::new(-300.0, -400.0, 450.0), Vec3f::z()),
        Posture::new(Vec3f::new(400.0, 100.0, 450.0), Vec3f::z()),
    ]);

    let mut voxels = topology.stats().material_voxels;
    let initial = voxels;

    while tool.advance() {
        topology.subtract(&tool.bounding_box(), |p: &Vec3f| tool.is_inside(p));

        let remaining = topology.stats().material_voxels;
        assert!(remaining <= voxels, "material grew during carving");
        voxels = remaining;
    }

    assert!(voxels < initial, "carving pass removed nothing");

    // Surviving cells never overlap the final tool position
    let mut coords = Vec::new();
    let mut sizes = Vec::new();
    topology.harvest(&mut coords, &mut sizes);

    assert_eq!(coords.len(), sizes.len());
    assert!(coords
        .iter()
        .all(|c| !tool.is_inside(&topology.from_gl(c))));
}

#[test]
fn test_cuboid_world_initializes_to_half_volume() {
    let mut topology = Topology::with_dimensions(1000.0, 500.0, 1000.0).unwrap();

    let mut coords = Vec::new();
    let mut sizes = Vec::new();
    topology.harvest(&mut coords, &mut sizes);

    assert!((total_volume(&sizes) - 4.0).abs() < 1e-3);
    assert!(coords.iter().all(|c| c.y.abs() < 0.5));
}

#[test]
fn test_invalid_dimensions_are_rejected() {
    assert!(matches!(
        Topology::new(0.0),
        Err(TopologyError::InvalidDimensions)
    ));
    assert!(matches!(
        Topology::new(-1.0),
        Err(TopologyError::InvalidDimensions)
    ));
    assert!(matches!(
        Topology::with_dimensions(10.0, -1.0, 10.0),
        Err(TopologyError::InvalidDimensions)
    ));
}

#[test]
fn test_bounds_enum_subtracts_like_plain_box() {
    let (bbox, inside) = sphere_at(Vec3f::zeros(), 150.0);

    let mut plain = Topology::new(1000.0).unwrap();
    plain.subtract(&bbox, &inside);

    let mut wrapped = Topology::new(1000.0).unwrap();
    wrapped.subtract(&Bounds3::from(bbox), &inside);

    let mut plain_coords = Vec::new();
    let mut plain_sizes = Vec::new();
    plain.harvest(&mut plain_coords, &mut plain_sizes);

    let mut wrapped_coords = Vec::new();
    let mut wrapped_sizes = Vec::new();
    wrapped.harvest(&mut wrapped_coords, &mut wrapped_sizes);

    assert_eq!(plain_coords, wrapped_coords);
    assert_eq!(plain_sizes, wrapped_sizes);
}

#[test]
fn test_metrics_sink_observes_every_subtract() {
    let calls = Arc::new(AtomicUsize::new(0));
    let observed = calls.clone();

    let mut topology = Topology::new(1000.0).unwrap();
    topology.set_metrics_sink(move |_| {
        observed.fetch_add(1, Ordering::Relaxed);
    });

    let (bbox, inside) = sphere_at(Vec3f::zeros(), 50.0);
    topology.subtract(&bbox, &inside);
    topology.subtract(&bbox, &inside);

    assert_eq!(calls.load(Ordering::Relaxed), 2);
}
