//! # Stage Tests

use std::sync::Arc;

use approx::assert_relative_eq;
use geom_buffer::MeshBuffer;
use glam::{Vec3, Vec4};

use super::*;
use crate::error::{ModifierError, PropertyError};
use crate::modifier::Modifier;

fn quad() -> MeshBuffer {
    let mut buffer = MeshBuffer::with_shared_vertices(0.001);
    let a = buffer.add_vertex_at(Vec3::new(0.0, 0.0, 0.0));
    let b = buffer.add_vertex_at(Vec3::new(1.0, 0.0, 0.0));
    let c = buffer.add_vertex_at(Vec3::new(1.0, 1.0, 0.0));
    let d = buffer.add_vertex_at(Vec3::new(0.0, 1.0, 0.0));
    buffer.add_triangle(a, b, c);
    buffer.add_triangle(a, c, d);
    buffer
}

#[test]
fn test_builtin_class_names_are_unique() {
    let mut names: Vec<&str> = builtin().iter().map(|m| m.class_name()).collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
    assert_eq!(total, 16);
}

#[test]
fn test_new_boxed_resets_properties() {
    let mut stage = Tesselate::new();
    stage.properties_mut().change("level", 3i64).unwrap();
    let copy = stage.clone_boxed();
    let fresh = stage.new_boxed();
    assert_eq!(copy.properties().get_int("level").unwrap(), 3);
    assert_eq!(fresh.properties().get_int("level").unwrap(), 1);
    assert_ne!(copy.id(), stage.id());
}

#[test]
fn test_tesselate_stage() {
    let mut stage = Tesselate::new();
    stage.properties_mut().change("level", 2i64).unwrap();
    let mut buffer = quad();
    stage.execute(&mut buffer).unwrap();
    assert_eq!(buffer.num_triangles(), 32);

    stage.properties_mut().change("level", 99i64).unwrap();
    assert_eq!(stage.properties().get_int("level").unwrap(), 10);
}

#[test]
fn test_tesselate_lines_stage() {
    let mut buffer = MeshBuffer::new();
    let a = buffer.add_vertex_at(Vec3::ZERO);
    let b = buffer.add_vertex_at(Vec3::X);
    buffer.add_line(a, b);
    TesselateLines::new().execute(&mut buffer).unwrap();
    assert_eq!(buffer.num_lines(), 2);
}

#[test]
fn test_extrude_stage_face_counts() {
    let mut stage = Extrude::new();
    let mut buffer = quad();
    stage.execute(&mut buffer).unwrap();
    assert_eq!(buffer.num_triangles(), 2 + 6 * 2);
    assert!(buffer.shared_vertices());

    stage.properties_mut().change("recognize_edges", true).unwrap();
    let mut buffer = quad();
    stage.execute(&mut buffer).unwrap();
    assert_eq!(buffer.num_triangles(), 2 + 4 * 2);

    stage.properties_mut().change("keep_original", true).unwrap();
    let mut buffer = quad();
    stage.execute(&mut buffer).unwrap();
    assert_eq!(buffer.num_triangles(), 2 + 2 + 4 * 2);
}

#[test]
fn test_normals_stage() {
    let mut buffer = quad();
    buffer.set_vertex_normal(0, Vec3::X);
    let mut stage = Normals::new();
    stage.execute(&mut buffer).unwrap();
    assert_eq!(buffer.normal(0), Vec3::Z);

    stage.properties_mut().change("calc", false).unwrap();
    stage.properties_mut().change("invert", true).unwrap();
    stage.execute(&mut buffer).unwrap();
    assert_eq!(buffer.normal(0), Vec3::NEG_Z);
}

#[test]
fn test_normalize_stage() {
    let mut buffer = MeshBuffer::new();
    buffer.add_vertex_at(Vec3::new(0.0, 4.0, 0.0));
    let mut stage = Normalize::new();
    stage.properties_mut().change("scale", 2.0).unwrap();
    stage.execute(&mut buffer).unwrap();
    assert_eq!(buffer.position(0), Vec3::new(0.0, 2.0, 0.0));
}

#[test]
fn test_topology_stages() {
    let mut buffer = quad();
    ConvertLines::new().execute(&mut buffer).unwrap();
    assert_eq!(buffer.num_triangles(), 0);
    assert_eq!(buffer.num_lines(), 5);

    let mut buffer = quad();
    let mut group = VertexGroup::new();
    group.properties_mut().change("group", false).unwrap();
    group.execute(&mut buffer).unwrap();
    assert_eq!(buffer.num_vertices(), 6);

    group.properties_mut().change("group", true).unwrap();
    group.execute(&mut buffer).unwrap();
    assert_eq!(buffer.num_vertices(), 4);
    assert!(buffer.shared_vertices());
}

#[test]
fn test_remove_stage_is_reproducible() {
    let mut source = quad();
    source.tesselate(2);
    let stage = Remove::new();

    let mut first = source.clone();
    let mut second = source.clone();
    stage.execute(&mut first).unwrap();
    stage.clone_boxed().execute(&mut second).unwrap();
    assert_eq!(first.triangle_indices(), second.triangle_indices());
}

#[test]
fn test_vertex_equation_stage() {
    let mut stage = VertexEquation::new();
    stage.properties_mut().change("equation_z", "x + y").unwrap();
    let mut buffer = quad();
    stage.execute(&mut buffer).unwrap();
    assert_eq!(buffer.position(2), Vec3::new(1.0, 1.0, 2.0));

    stage.properties_mut().change("single", true).unwrap();
    stage.properties_mut().change("equation", "y = y * 3").unwrap();
    stage.execute(&mut buffer).unwrap();
    assert_eq!(buffer.position(2), Vec3::new(1.0, 3.0, 2.0));
}

#[test]
fn test_equation_failure_leaves_buffer_unchanged() {
    let mut stage = VertexEquation::new();
    stage.properties_mut().change("equation_y", "sin(").unwrap();
    let mut buffer = quad();
    let before = buffer.clone();

    let err = stage.execute(&mut buffer).unwrap_err();
    assert_eq!(err.stage(), VertexEquation::CLASS);
    assert!(matches!(err, ModifierError::Equation { .. }));
    assert_eq!(buffer.positions(), before.positions());

    let mut primitive = PrimitiveEquation::new();
    primitive.properties_mut().change("calc_normals_before", true).unwrap();
    primitive.properties_mut().change("equation_x", "nx +").unwrap();
    buffer.set_vertex_normal(0, Vec3::X);
    assert!(primitive.execute(&mut buffer).is_err());
    assert_eq!(buffer.normal(0), Vec3::X);
    assert_eq!(buffer.num_vertices(), 4);
}

#[test]
fn test_primitive_equation_stage() {
    let mut stage = PrimitiveEquation::new();
    stage.properties_mut().change("calc_normals_before", true).unwrap();
    stage.properties_mut().change("single", true).unwrap();
    let mut buffer = quad();
    stage.execute(&mut buffer).unwrap();

    assert_eq!(buffer.num_vertices(), 6);
    assert!(!buffer.shared_vertices());
    // Default program pushes corners out along the computed normal
    assert!(buffer.positions().chunks_exact(3).all(|p| (p[2] - 0.1).abs() < 1e-6));
}

#[test]
fn test_tex_coord_equation_stage() {
    let mut stage = TexCoordEquation::new();
    stage.properties_mut().change("equation_s", "x * 2").unwrap();
    let mut buffer = quad();
    stage.execute(&mut buffer).unwrap();
    assert_eq!(buffer.tex_coord(1).x, 2.0);
}

#[test]
fn test_transform_stages() {
    let mut buffer = MeshBuffer::new();
    buffer.add_vertex_at(Vec3::new(1.0, 0.0, 0.0));

    let mut translate = Translate::new();
    translate.properties_mut().change("y", 2.0).unwrap();
    translate.execute(&mut buffer).unwrap();
    assert_eq!(buffer.position(0), Vec3::new(1.0, 2.0, 0.0));

    let mut scale = Scale::new();
    scale.properties_mut().change("all", 2.0).unwrap();
    scale.properties_mut().change("x", 3.0).unwrap();
    scale.execute(&mut buffer).unwrap();
    assert_eq!(buffer.position(0), Vec3::new(6.0, 4.0, 0.0));

    let mut rotate = Rotate::new();
    rotate.properties_mut().change("angle", 90.0).unwrap();
    rotate.execute(&mut buffer).unwrap();
    let p = buffer.position(0);
    assert_relative_eq!(p.x, -4.0, epsilon = 1e-4);
    assert_relative_eq!(p.y, 6.0, epsilon = 1e-4);
    assert_relative_eq!(p.z, 0.0);

    rotate.properties_mut().change("z", 0.0).unwrap();
    rotate.execute(&mut buffer).unwrap();
    assert_eq!(buffer.position(0), p);
}

#[test]
fn test_text_stage_restores_pen() {
    let mut stage = Text::new();
    stage.properties_mut().change("text", "HI").unwrap();
    stage
        .properties_mut()
        .change("color", vec![1.0, 0.0, 0.0, 1.0])
        .unwrap();
    let mut buffer = MeshBuffer::new();
    stage.execute(&mut buffer).unwrap();

    assert!(buffer.num_lines() > 0);
    assert_eq!(buffer.color(0), Vec4::new(1.0, 0.0, 0.0, 1.0));
    assert_eq!(buffer.pen().color, Vec4::ONE);
}

#[test]
fn test_wrong_property_type_is_reported() {
    let mut stage = Translate::new();
    stage.properties_mut().define("x", "x", "", "oops");
    let err = stage.execute(&mut MeshBuffer::new()).unwrap_err();
    assert_eq!(
        err,
        ModifierError::property(
            Translate::CLASS,
            PropertyError::TypeMismatch {
                id: "x".into(),
                expected: "float",
                found: "text",
            }
        )
    );
}

/// Appends one line; fails on the source `fail`.
struct LineHost;

impl ScriptHost for LineHost {
    fn run(&self, source: &str, buffer: &mut MeshBuffer) -> Result<(), String> {
        let a = buffer.add_vertex_at(Vec3::ZERO);
        let b = buffer.add_vertex_at(Vec3::ONE);
        buffer.add_line(a, b);
        if source == "fail" {
            return Err("script asked to fail".into());
        }
        Ok(())
    }
}

// Every script host assertion lives in this one test, the host is global
#[test]
fn test_script_stage_host_lifecycle() {
    let mut stage = Script::new();
    let mut buffer = quad();

    set_script_host(None);
    stage.execute(&mut buffer).unwrap();
    assert_eq!(buffer.num_lines(), 0);

    set_script_host(Some(Arc::new(LineHost)));
    stage.execute(&mut buffer).unwrap();
    assert_eq!(buffer.num_lines(), 1);
    assert!(buffer.shared_vertices());

    stage.properties_mut().change("script", "fail").unwrap();
    let err = stage.execute(&mut buffer).unwrap_err();
    assert!(matches!(err, ModifierError::Script { .. }));
    assert_eq!(buffer.num_lines(), 1);

    assert!(set_script_host(None).is_some());
    assert!(script_host().is_none());
}
