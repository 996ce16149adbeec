//! # Mesh Operation Tests

use crate::ops::equation::CompiledExpression;
use crate::{
    EquationError, EquationEvaluator, Equations, ExpressionEvaluator, ExtrudeParams, MeshBuffer,
};
use approx::assert_relative_eq;
use config::constants::PROGRESS_MAX;
use glam::{Mat4, Vec2, Vec3, Vec4};

// =============================================================================
// HELPERS
// =============================================================================

/// Unit square in the XY plane as two counter-clockwise triangles.
fn quad(shared: bool) -> MeshBuffer {
    let mut buffer = if shared {
        MeshBuffer::with_shared_vertices(0.001)
    } else {
        MeshBuffer::new()
    };
    let a = buffer.add_vertex_at(Vec3::new(0.0, 0.0, 0.0));
    let b = buffer.add_vertex_at(Vec3::new(1.0, 0.0, 0.0));
    let c = buffer.add_vertex_at(Vec3::new(1.0, 1.0, 0.0));
    let d = buffer.add_vertex_at(Vec3::new(0.0, 1.0, 0.0));
    buffer.add_triangle(a, b, c);
    buffer.add_triangle(a, c, d);
    buffer
}

/// Unit square with every triangle corner as its own vertex.
fn split_quad() -> MeshBuffer {
    let mut buffer = MeshBuffer::new();
    let corners = [
        [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0)],
        [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
    ];
    for [a, b, c] in corners {
        let a = buffer.add_vertex_at(a);
        let b = buffer.add_vertex_at(b);
        let c = buffer.add_vertex_at(c);
        buffer.add_triangle(a, b, c);
    }
    buffer
}

fn single_triangle() -> MeshBuffer {
    let mut buffer = MeshBuffer::new();
    let a = buffer.add_vertex_at(Vec3::ZERO);
    let b = buffer.add_vertex_at(Vec3::X);
    let c = buffer.add_vertex_at(Vec3::Y);
    buffer.add_triangle(a, b, c);
    buffer
}

/// Unit cube with 8 shared corners and 12 outward-facing triangles.
fn unit_cube() -> MeshBuffer {
    let mut buffer = MeshBuffer::with_shared_vertices(0.001);
    for i in 0..8u32 {
        let p = Vec3::new((i & 1) as f32, ((i >> 1) & 1) as f32, ((i >> 2) & 1) as f32);
        buffer.add_vertex_at(p);
    }
    let faces: [[u32; 4]; 6] = [
        [0, 2, 6, 4],
        [1, 3, 7, 5],
        [0, 1, 5, 4],
        [2, 3, 7, 6],
        [0, 1, 3, 2],
        [4, 5, 7, 6],
    ];
    let center = Vec3::splat(0.5);
    for [q0, q1, q2, q3] in faces {
        for [a, b, c] in [[q0, q1, q2], [q0, q2, q3]] {
            let (pa, pb, pc) = (buffer.position(a), buffer.position(b), buffer.position(c));
            let outward = (pb - pa).cross(pc - pa).dot((pa + pb + pc) / 3.0 - center) > 0.0;
            if outward {
                buffer.add_triangle(a, b, c);
            } else {
                buffer.add_triangle(a, c, b);
            }
        }
    }
    buffer
}

fn face_normal(buffer: &MeshBuffer, [a, b, c]: [u32; 3]) -> Vec3 {
    let pa = buffer.position(a);
    (buffer.position(b) - pa).cross(buffer.position(c) - pa).normalize()
}

/// Evaluator that refuses every source.
struct RejectAll;

impl ExpressionEvaluator for RejectAll {
    fn compile(
        &self,
        source: &str,
        _variables: &[&str],
        _constants: &[(&str, f64)],
    ) -> Result<Box<dyn CompiledExpression>, String> {
        Err(format!("rejected '{source}'"))
    }
}

// =============================================================================
// NORMALS
// =============================================================================

#[test]
fn test_cube_normals_are_smooth_and_outward() {
    let mut cube = unit_cube();
    assert_eq!(cube.num_vertices(), 8);
    assert_eq!(cube.num_triangles(), 12);

    cube.calculate_triangle_normals();

    let center = Vec3::splat(0.5);
    for v in 0..8u32 {
        let expected = cube
            .triangles()
            .filter(|t| t.contains(&v))
            .map(|t| face_normal(&cube, t))
            .sum::<Vec3>()
            .normalize();
        let normal = cube.normal(v);
        assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(normal.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(normal.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(normal.z, expected.z, epsilon = 1e-5);
        assert!(normal.dot(cube.position(v) - center) > 0.0);
    }
    assert_eq!(cube.progress().get(), PROGRESS_MAX);
}

#[test]
fn test_unreferenced_vertex_gets_zero_normal() {
    let mut buffer = single_triangle();
    let lonely = buffer.add_vertex_at(Vec3::new(5.0, 5.0, 5.0));
    buffer.calculate_triangle_normals();
    assert_eq!(buffer.normal(0), Vec3::Z);
    assert_eq!(buffer.normal(lonely), Vec3::ZERO);
}

#[test]
fn test_invert_normals() {
    let mut buffer = single_triangle();
    buffer.invert_normals();
    assert_eq!(buffer.normal(0), Vec3::NEG_Z);
}

// =============================================================================
// TOPOLOGY
// =============================================================================

#[test]
fn test_un_group_gives_each_corner_a_vertex() {
    let mut buffer = quad(true);
    assert_eq!(buffer.num_vertices(), 4);
    buffer.un_group_vertices();
    assert_eq!(buffer.num_vertices(), 6);
    assert_eq!(buffer.triangle_indices(), &[0, 1, 2, 3, 4, 5]);
    assert!(!buffer.shared_vertices());
    assert_eq!(buffer.position(3), Vec3::ZERO);
    assert_eq!(buffer.position(4), Vec3::new(1.0, 1.0, 0.0));
}

#[test]
fn test_un_group_copies_lines_after_triangles() {
    let mut buffer = quad(true);
    buffer.add_line(0, 2);
    buffer.add_vertex_at(Vec3::splat(9.0));
    buffer.un_group_vertices();
    assert_eq!(buffer.num_vertices(), 8);
    assert_eq!(buffer.line_indices(), &[6, 7]);
    assert_eq!(buffer.position(7), Vec3::new(1.0, 1.0, 0.0));
}

#[test]
fn test_group_vertices_merges_and_drops_collapsed() {
    let mut buffer = split_quad();
    let a = buffer.add_vertex_at(Vec3::splat(4.0));
    let b = buffer.add_vertex_at(Vec3::splat(4.0001));
    let c = buffer.add_vertex_at(Vec3::splat(4.0002));
    buffer.add_triangle(a, b, c);
    buffer.add_line(a, b);

    buffer.group_vertices(0.01);

    assert_eq!(buffer.num_vertices(), 5);
    assert_eq!(buffer.num_triangles(), 2);
    assert_eq!(buffer.num_lines(), 0);
    assert_eq!(buffer.share_threshold(), Some(0.01));
    assert!(buffer.validate());
}

#[test]
fn test_convert_to_lines_dedups_shared_edges() {
    let mut buffer = quad(true);
    buffer.add_line(0, 1);
    buffer.convert_to_lines();
    assert_eq!(buffer.num_triangles(), 0);
    // 5 unique edges plus the line that was already there
    assert_eq!(buffer.num_lines(), 6);
}

#[test]
fn test_convert_to_lines_without_triangles_is_noop() {
    let mut buffer = MeshBuffer::new();
    let a = buffer.add_vertex_at(Vec3::ZERO);
    let b = buffer.add_vertex_at(Vec3::X);
    buffer.add_line(a, b);
    buffer.convert_to_lines();
    assert_eq!(buffer.num_lines(), 1);
}

// =============================================================================
// TESSELATION
// =============================================================================

#[test]
fn test_tesselate_unshared_triangle() {
    let mut buffer = single_triangle();
    buffer.tesselate(1);
    assert_eq!(buffer.num_triangles(), 4);
    assert_eq!(buffer.num_vertices(), 6);
    assert_eq!(buffer.progress().get(), PROGRESS_MAX);
}

#[test]
fn test_tesselate_shares_edge_midpoints() {
    let mut buffer = quad(true);
    buffer.tesselate(1);
    assert_eq!(buffer.num_triangles(), 8);
    // 4 corners plus 5 edge midpoints, the diagonal one shared
    assert_eq!(buffer.num_vertices(), 9);
}

#[test]
fn test_tesselate_split_order_and_attributes() {
    let mut buffer = MeshBuffer::new();
    let a = buffer.add_vertex(crate::Vertex::at(Vec3::ZERO).with_color(Vec4::new(1.0, 0.0, 0.0, 1.0)));
    let b = buffer.add_vertex(crate::Vertex::at(Vec3::X).with_color(Vec4::new(0.0, 1.0, 0.0, 1.0)));
    let c = buffer.add_vertex_at(Vec3::Y);
    buffer.add_triangle(a, b, c);
    buffer.tesselate(1);

    let [first_a, ab, ca] = buffer.triangle(0);
    assert_eq!(first_a, a);
    assert_eq!(buffer.position(ab), Vec3::new(0.5, 0.0, 0.0));
    assert_eq!(buffer.position(ca), Vec3::new(0.0, 0.5, 0.0));
    assert_eq!(buffer.color(ab), Vec4::new(0.5, 0.5, 0.0, 1.0));
    assert_eq!(buffer.triangle(3)[2], c);
}

#[test]
fn test_tesselate_keeps_lines_and_level_zero() {
    let mut buffer = quad(false);
    buffer.add_line(0, 1);
    buffer.tesselate(0);
    assert_eq!(buffer.num_triangles(), 2);
    buffer.tesselate(2);
    assert_eq!(buffer.num_triangles(), 32);
    assert_eq!(buffer.line_indices(), &[0, 1]);
}

#[test]
fn test_tesselate_lines() {
    let mut buffer = MeshBuffer::new();
    let a = buffer.add_vertex_at(Vec3::ZERO);
    let b = buffer.add_vertex_at(Vec3::new(4.0, 0.0, 0.0));
    buffer.add_line(a, b);
    buffer.tesselate_lines(2);

    assert_eq!(buffer.num_lines(), 4);
    assert_eq!(buffer.num_vertices(), 5);
    let xs: Vec<f32> = buffer.lines().map(|[p, _]| buffer.position(p).x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
}

// =============================================================================
// RANDOM REMOVAL
// =============================================================================

#[test]
fn test_removal_extremes() {
    let mut keep = quad(false);
    keep.remove_primitives_randomly(0.0, 1);
    assert_eq!(keep.num_triangles(), 2);

    let mut drop = quad(false);
    drop.remove_primitives_randomly(1.0, 1);
    assert_eq!(drop.num_triangles(), 0);
    assert_eq!(drop.num_vertices(), 4);
}

#[test]
fn test_removal_is_seeded() {
    let mut source = quad(false);
    source.tesselate(3);

    let mut first = source.clone();
    let mut second = source.clone();
    first.remove_primitives_randomly(0.5, 42);
    second.remove_primitives_randomly(0.5, 42);
    assert_eq!(first.triangle_indices(), second.triangle_indices());
    assert!(first.num_triangles() > 0 && first.num_triangles() < source.num_triangles());
}

// =============================================================================
// EQUATIONS
// =============================================================================

#[test]
fn test_vertex_program_writes_attributes() {
    let mut buffer = MeshBuffer::new();
    buffer.add_vertex_at(Vec3::new(1.0, 2.0, 3.0));
    buffer
        .transform_with_equation(
            &EquationEvaluator,
            Equations::Program("x = x * 2; red = 0.5; alpha = 7; bright = 0.5"),
            &[],
        )
        .unwrap();

    assert_eq!(buffer.position(0), Vec3::new(2.0, 2.0, 3.0));
    let color = buffer.color(0);
    assert_relative_eq!(color.x, 0.25);
    assert_relative_eq!(color.y, 0.5);
    assert_relative_eq!(color.w, 1.0);
}

#[test]
fn test_vertex_components_see_unmodified_inputs() {
    let mut buffer = MeshBuffer::new();
    buffer.add_vertex_at(Vec3::new(1.0, 2.0, 3.0));
    buffer.add_vertex_at(Vec3::new(4.0, 5.0, 6.0));
    buffer
        .transform_with_equation(&EquationEvaluator, Equations::Components(["y", "x", "i"]), &[])
        .unwrap();
    assert_eq!(buffer.position(0), Vec3::new(2.0, 1.0, 0.0));
    assert_eq!(buffer.position(1), Vec3::new(5.0, 4.0, 1.0));
}

#[test]
fn test_equation_compile_error_leaves_buffer_unchanged() {
    let mut buffer = quad(true);
    let before = buffer.clone();

    let err = buffer
        .transform_with_equation(&EquationEvaluator, Equations::Components(["x", "y +", "z"]), &[])
        .unwrap_err();
    assert_eq!(err.target(), "y");
    assert_eq!(buffer.positions(), before.positions());

    let err = buffer
        .transform_primitives_with_equation(&EquationEvaluator, Equations::Program("x = ("), &[])
        .unwrap_err();
    assert_eq!(err.target(), "program");
    assert_eq!(buffer.num_vertices(), 4);
    assert!(buffer.shared_vertices());
}

#[test]
fn test_injected_evaluator_error_is_reported() {
    let mut buffer = quad(false);
    let err = buffer
        .transform_tex_coords_with_equation(&RejectAll, "s", "t", &[])
        .unwrap_err();
    assert_eq!(err, EquationError::compile("s", "rejected 's'"));
    assert_eq!(buffer.tex_coord(0), Vec2::ZERO);
}

#[test]
fn test_primitive_equation_ungroups_and_moves_corners() {
    let mut buffer = quad(true);
    buffer.add_line(0, 2);
    buffer
        .transform_primitives_with_equation(
            &EquationEvaluator,
            Equations::Components(["x + p", "y", "z + i"]),
            &[],
        )
        .unwrap();

    assert_eq!(buffer.num_vertices(), 8);
    assert!(!buffer.shared_vertices());
    let [_, _, c] = buffer.triangle(1);
    assert_eq!(buffer.position(c), Vec3::new(2.0, 1.0, 1.0));
    let [la, lb] = buffer.line(0);
    assert_eq!(buffer.position(la), Vec3::ZERO);
    assert_eq!(buffer.position(lb), Vec3::new(2.0, 1.0, 0.0));
}

#[test]
fn test_primitive_equation_moves_line_corners() {
    let mut buffer = MeshBuffer::new();
    let a = buffer.add_vertex_at(Vec3::ZERO);
    let b = buffer.add_vertex_at(Vec3::X);
    buffer.add_line(a, b);

    buffer
        .transform_primitives_with_equation(
            &EquationEvaluator,
            Equations::Components(["x + 5", "y", "z"]),
            &[],
        )
        .unwrap();
    let [la, lb] = buffer.line(0);
    assert_eq!(buffer.position(la), Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(buffer.position(lb), Vec3::new(6.0, 0.0, 0.0));

    // Lines see both end points; the missing third corner reads zero
    buffer
        .transform_primitives_with_equation(
            &EquationEvaluator,
            Equations::Program("y = x2 - x1; z = x3 + p"),
            &[],
        )
        .unwrap();
    let [la, lb] = buffer.line(0);
    assert_eq!(buffer.position(la), Vec3::new(5.0, 1.0, 0.0));
    assert_eq!(buffer.position(lb), Vec3::new(6.0, 1.0, 1.0));
    assert_eq!(buffer.num_triangles(), 0);
}

#[test]
fn test_primitive_corners_see_original_triangle() {
    let mut buffer = single_triangle();
    buffer
        .transform_primitives_with_equation(
            &EquationEvaluator,
            Equations::Program("x = x3 + x2; y = y1"),
            &[],
        )
        .unwrap();
    for i in 0..3 {
        assert_eq!(buffer.position(i), Vec3::new(1.0, 0.0, 0.0));
    }
}

#[test]
fn test_equation_constants() {
    let mut buffer = single_triangle();
    buffer
        .transform_with_equation(&EquationEvaluator, Equations::Components(["x", "y", "k"]), &[("k", 2.5)])
        .unwrap();
    assert!(buffer.positions().chunks_exact(3).all(|p| p[2] == 2.5));
}

#[test]
fn test_tex_coord_equation() {
    let mut buffer = quad(false);
    buffer
        .transform_tex_coords_with_equation(&EquationEvaluator, "x", "y + 1", &[])
        .unwrap();
    assert_eq!(buffer.tex_coord(2), Vec2::new(1.0, 2.0));
    assert_eq!(buffer.position(2), Vec3::new(1.0, 1.0, 0.0));
}

#[test]
fn test_equation_moves_keep_sharing_consistent() {
    let mut buffer = quad(true);
    buffer
        .transform_with_equation(&EquationEvaluator, Equations::Components(["x + 10", "y", "z"]), &[])
        .unwrap();
    assert_eq!(buffer.find_vertex(Vec3::new(10.0, 0.0, 0.0)), Some(0));
    assert_eq!(buffer.find_vertex(Vec3::ZERO), None);
}

// =============================================================================
// EXTRUSION
// =============================================================================

#[test]
fn test_extrude_quad_with_edge_recognition() {
    let source = quad(false);
    let mut out = MeshBuffer::new();
    let params = ExtrudeParams {
        recognize_edges: true,
        ..Default::default()
    };
    let stats = source.extrude_triangles(&mut out, &params);
    assert_eq!(stats.front_faces, 2);
    assert_eq!(stats.side_walls, 4);
    assert_eq!(out.num_triangles(), 2 + 4 * 2);
}

#[test]
fn test_extrude_quad_without_edge_recognition() {
    let source = quad(false);
    let mut out = MeshBuffer::new();
    let stats = source.extrude_triangles(&mut out, &ExtrudeParams::default());
    assert_eq!(stats.side_walls, 6);
    assert_eq!(out.num_triangles(), 14);
    // First front corner sits above the source corner along +z
    assert_relative_eq!(out.position(0).z, 0.1);
    assert_eq!(source.num_triangles(), 2);
}

#[test]
fn test_extrude_finds_neighbors_by_position() {
    let source = split_quad();
    let mut out = MeshBuffer::with_shared_vertices(0.001);
    let params = ExtrudeParams {
        recognize_edges: true,
        ..Default::default()
    };
    let stats = source.extrude_triangles(&mut out, &params);
    assert_eq!(stats.side_walls, 4);
    // 4 base corners plus 4 shifted corners
    assert_eq!(out.num_vertices(), 8);
}

#[test]
fn test_extrude_creased_edge_keeps_wall() {
    let mut source = MeshBuffer::new();
    let a = source.add_vertex_at(Vec3::ZERO);
    let b = source.add_vertex_at(Vec3::X);
    let c = source.add_vertex_at(Vec3::Y);
    let d = source.add_vertex_at(Vec3::NEG_Z);
    source.add_triangle(a, b, c);
    source.add_triangle(b, a, d);

    let mut out = MeshBuffer::new();
    let params = ExtrudeParams {
        recognize_edges: true,
        ..Default::default()
    };
    assert_eq!(source.extrude_triangles(&mut out, &params).side_walls, 6);
}

#[test]
fn test_extrude_size_factor() {
    let source = single_triangle();
    let mut out = MeshBuffer::new();
    let params = ExtrudeParams {
        constant: 0.0,
        factor: 1.0,
        create_outer_faces: false,
        ..Default::default()
    };
    let stats = source.extrude_triangles(&mut out, &params);
    assert_eq!(stats.side_walls, 0);
    assert_eq!(out.num_triangles(), 1);
    let size = (2.0 + 2.0f32.sqrt()) * 2.0 / 3.0;
    assert_relative_eq!(out.position(0).z, size, epsilon = 1e-5);
}

#[test]
fn test_extrude_collapsed_front_and_degenerate_source() {
    let source = single_triangle();
    let mut out = MeshBuffer::new();
    let params = ExtrudeParams {
        shift_center: 1.0,
        create_outer_faces: false,
        ..Default::default()
    };
    assert_eq!(source.extrude_triangles(&mut out, &params).front_faces, 0);

    let mut flat = MeshBuffer::new();
    let a = flat.add_vertex_at(Vec3::ZERO);
    let b = flat.add_vertex_at(Vec3::X);
    let c = flat.add_vertex_at(Vec3::new(2.0, 0.0, 0.0));
    flat.add_triangle(a, b, c);
    let mut out = MeshBuffer::new();
    let stats = flat.extrude_triangles(&mut out, &ExtrudeParams::default());
    assert_eq!(stats, Default::default());
    assert!(out.is_empty());
}

// =============================================================================
// RAY QUERIES
// =============================================================================

#[test]
fn test_intersects_returns_closest() {
    let mut buffer = single_triangle();
    let mut lower = single_triangle();
    lower.translate(Vec3::new(0.0, 0.0, -2.0));
    buffer.add_geometry(&lower, Vec3::ZERO);
    buffer.add_geometry(&single_triangle(), Vec3::new(0.0, 0.0, 1.0));

    let hit = buffer
        .intersects(Vec3::new(0.25, 0.25, -5.0), Vec3::Z)
        .unwrap();
    assert_eq!(hit.triangle, 1);
    assert_relative_eq!(hit.distance, 3.0, epsilon = 1e-5);
    assert_relative_eq!(hit.position.z, -2.0, epsilon = 1e-5);
}

#[test]
fn test_intersects_misses() {
    let buffer = single_triangle();
    assert!(buffer.intersects(Vec3::new(2.0, 2.0, 1.0), Vec3::NEG_Z).is_none());
    assert!(buffer.intersects(Vec3::new(0.2, 0.2, 1.0), Vec3::Z).is_none());
    assert!(buffer.intersects(Vec3::new(0.2, 0.2, 1.0), Vec3::X).is_none());
    assert!(MeshBuffer::new().intersects(Vec3::ZERO, Vec3::Z).is_none());
}

// =============================================================================
// TRANSFORMS
// =============================================================================

#[test]
fn test_non_uniform_scale_keeps_unit_normals() {
    let mut buffer = MeshBuffer::new();
    buffer.set_normal(Vec3::new(1.0, 1.0, 0.0).normalize());
    buffer.add_vertex_at(Vec3::ONE);
    buffer.scale(Vec3::new(2.0, 1.0, 1.0));

    assert_eq!(buffer.position(0), Vec3::new(2.0, 1.0, 1.0));
    let expected = Vec3::new(1.0, 2.0, 0.0).normalize();
    let normal = buffer.normal(0);
    assert_relative_eq!(normal.x, expected.x, epsilon = 1e-5);
    assert_relative_eq!(normal.y, expected.y, epsilon = 1e-5);
    assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-5);
}

#[test]
fn test_apply_matrix_translation_leaves_normals() {
    let mut buffer = single_triangle();
    buffer.apply_matrix(&Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    assert_eq!(buffer.position(1), Vec3::new(2.0, 2.0, 3.0));
    assert_eq!(buffer.normal(1), Vec3::Z);
}

#[test]
fn test_singular_matrix_skips_normals() {
    let mut buffer = single_triangle();
    buffer.scale(Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(buffer.normal(0), Vec3::Z);
}

#[test]
fn test_translate_rekeys_shared_vertices() {
    let mut buffer = quad(true);
    buffer.translate(Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(buffer.add_vertex_at(Vec3::new(1.0, 1.0, 5.0)), 2);
    assert_eq!(buffer.num_vertices(), 4);
}

#[test]
fn test_normalize_sphere() {
    let mut buffer = MeshBuffer::new();
    buffer.add_vertex_at(Vec3::new(2.0, 0.0, 0.0));
    buffer.add_vertex_at(Vec3::ZERO);
    buffer.add_vertex_at(Vec3::new(0.0, 0.0, -4.0));

    let mut half = buffer.clone();
    half.normalize_sphere(1.0, 0.5);
    assert_eq!(half.position(0), Vec3::new(1.5, 0.0, 0.0));

    buffer.normalize_sphere(3.0, 1.0);
    assert_eq!(buffer.position(0), Vec3::new(3.0, 0.0, 0.0));
    assert_eq!(buffer.position(1), Vec3::ZERO);
    assert_eq!(buffer.position(2), Vec3::new(0.0, 0.0, -3.0));
}

#[test]
fn test_tex_coord_edits() {
    let mut buffer = MeshBuffer::new();
    buffer.set_tex_coord(Vec2::new(0.25, 0.5));
    buffer.add_vertex_at(Vec3::ZERO);

    buffer.invert_tex_coords(true, false);
    assert_eq!(buffer.tex_coord(0), Vec2::new(0.75, 0.5));
    buffer.shift_tex_coords(Vec2::new(0.25, -0.5));
    assert_eq!(buffer.tex_coord(0), Vec2::new(1.0, 0.0));
    buffer.scale_tex_coords(Vec2::new(2.0, 3.0));
    assert_eq!(buffer.tex_coord(0), Vec2::new(2.0, 0.0));
}
