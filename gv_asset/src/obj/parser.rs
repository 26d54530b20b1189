use glam::Vec3;
use gv_format::FaceVertex;
use log::{debug, warn};

use super::{builder::ObjMeshBuilder, meta::ObjMeta};

// parses wavefront obj (https://en.wikipedia.org/wiki/Wavefront_.obj_file)
// the implementation is very forgiving: nothing in the text can make it fail
pub(crate) fn parse(text: &str, meta: ObjMeta) -> ObjMeshBuilder {
    let mut builder = ObjMeshBuilder::new(meta);

    for line in text.lines() {
        parse_line(line, &mut builder);
    }

    builder
}

fn parse_line(line: &str, builder: &mut ObjMeshBuilder) {
    // strip comments
    let line = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };

    let mut parts = line.split_whitespace();
    if let Some(command) = parts.next() {
        let args: Vec<&str> = parts.collect();
        parse_token(command, &args, builder);
    }
}

fn parse_token(command: &str, args: &[&str], builder: &mut ObjMeshBuilder) {
    match command {
        // vertex
        "v" => builder.push_point(parse_vec3(args)),
        // vertex normals
        "vn" => builder.push_normal(parse_vec3(args)),
        // texture coordinates
        "vt" => builder.push_uv(parse_vec2(args)),
        // material (submesh)
        "usemtl" => builder.use_material(&args.join(" ")),
        // material definition, the submesh is created by `usemtl`
        "newmtl" => builder.select_material(&args.join(" ")),
        "Ns" => {
            let ns = parse_float(args.first().copied());
            builder.set_material(command, |m| m.ns = Some(ns));
        }
        "d" => {
            let d = parse_float(args.first().copied());
            builder.set_material(command, |m| m.d = Some(d));
        }
        "Ka" => {
            let ka = Vec3::from(parse_vec3(args));
            builder.set_material(command, |m| m.ka = Some(ka));
        }
        "Kd" => {
            let kd = Vec3::from(parse_vec3(args));
            builder.set_material(command, |m| m.kd = Some(kd));
        }
        "Ks" => {
            let ks = Vec3::from(parse_vec3(args));
            builder.set_material(command, |m| m.ks = Some(ks));
        }
        "f" => {
            if let Some(face) = parse_face(args, builder) {
                builder.push_face(&face);
            }
        }
        _ if builder.meta.warn_unknown => warn!("Ignoring unknown token: \"{}\"", command),
        _ => debug!("Ignoring unknown token: \"{}\"", command),
    }
}

// a missing or malformed number becomes NaN, like the rest of the file it is not validated
fn parse_float(value: Option<&str>) -> f32 {
    match value.map(str::parse::<f32>) {
        Some(Ok(f)) => f,
        Some(Err(_)) | None => {
            warn!("Could not parse number {:?}, using NaN", value.unwrap_or(""));
            f32::NAN
        }
    }
}

fn parse_vec3(args: &[&str]) -> [f32; 3] {
    [
        parse_float(args.first().copied()),
        parse_float(args.get(1).copied()),
        parse_float(args.get(2).copied()),
    ]
}

fn parse_vec2(args: &[&str]) -> [f32; 2] {
    [
        parse_float(args.first().copied()),
        parse_float(args.get(1).copied()),
    ]
}

// resolves every face vertex against the element counts at this point of the file,
// relative indices depend on it
fn parse_face(args: &[&str], builder: &ObjMeshBuilder) -> Option<Vec<FaceVertex>> {
    let counts = (builder.points.len(), builder.uvs.len(), builder.normals.len());

    let face: Option<Vec<FaceVertex>> = args
        .iter()
        .map(|x| parse_face_vertex(x, counts))
        .collect();

    if face.is_none() {
        warn!("Skipping face with unresolvable vertex: \"{}\"", args.join(" "));
    }
    face
}

// parses a single face vertex of the form `v`, `v/t`, `v//n` or `v/t/n`
fn parse_face_vertex(
    value: &str,
    (num_points, num_uvs, num_normals): (usize, usize, usize),
) -> Option<FaceVertex> {
    let fields: Vec<&str> = value.split('/').collect();

    let point = resolve_index(fields[0], num_points)?;

    let uv = match fields.get(1) {
        Some(field) if !field.is_empty() => resolve_optional(field, num_uvs),
        _ => None,
    };

    let normal = if fields.len() == 3 {
        resolve_optional(fields[2], num_normals)
    } else {
        None
    };

    Some(FaceVertex { point, uv, normal })
}

fn resolve_optional(value: &str, count: usize) -> Option<usize> {
    let idx = resolve_index(value, count);
    if idx.is_none() && !value.is_empty() {
        warn!("Dropping unresolvable face index \"{}\"", value);
    }
    idx
}

// 1-based indices count from the start, negative ones back from the last element read so far
fn resolve_index(value: &str, count: usize) -> Option<usize> {
    let idx: i64 = value.parse().ok()?;
    let resolved = if idx < 0 { count as i64 + idx } else { idx - 1 };

    if resolved < 0 {
        None
    } else {
        Some(resolved as usize)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn counts(n: usize) -> (usize, usize, usize) {
        (n, n, n)
    }

    #[test]
    fn test_parse_token() {
        let mut builder = ObjMeshBuilder::default();

        parse_token("v", &["1", "2", "3"], &mut builder);
        parse_token("v", &["4", "5", "6"], &mut builder);
        parse_token("vn", &["0", "1", "0"], &mut builder);
        parse_token("vt", &["0.5", "1"], &mut builder);
        parse_token("s", &["off"], &mut builder);

        assert_eq!(
            builder.points,
            vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]
        );
        assert_eq!(builder.normals, vec![Vec3::new(0.0, 1.0, 0.0)]);
        assert_eq!(builder.uvs.len(), 1);
        assert_eq!(builder.bbox.max, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_parse_line_strips_comments() {
        let mut builder = ObjMeshBuilder::default();

        parse_line("  v 1 1 1 # a comment", &mut builder);
        parse_line("# v 2 2 2", &mut builder);
        parse_line("   ", &mut builder);
        parse_line("\tv\t3  3   3", &mut builder);

        assert_eq!(
            builder.points,
            vec![Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 3.0, 3.0)]
        );
    }

    #[test]
    fn test_parse_malformed_number() {
        let mut builder = ObjMeshBuilder::default();
        parse_token("v", &["1", "x"], &mut builder);

        assert_eq!(builder.points.len(), 1);
        assert_eq!(builder.points[0].x, 1.0);
        assert!(builder.points[0].y.is_nan());
        assert!(builder.points[0].z.is_nan());
    }

    #[test]
    fn test_parse_material_name() {
        let mut builder = ObjMeshBuilder::default();
        parse_token("usemtl", &["dark", "wood"], &mut builder);
        parse_token("Ns", &["10", "20"], &mut builder);

        assert_eq!(builder.submeshes[0].name.as_deref(), Some("dark wood"));
        assert_eq!(builder.submeshes[0].material.ns, Some(10.0));
    }

    #[test]
    fn test_parse_face_vertex() {
        assert_eq!(
            parse_face_vertex("1", counts(5)),
            Some(FaceVertex {
                point: 0,
                ..FaceVertex::default()
            })
        );
        assert_eq!(
            parse_face_vertex("2/3", counts(5)),
            Some(FaceVertex {
                point: 1,
                uv: Some(2),
                normal: None,
            })
        );
        assert_eq!(
            parse_face_vertex("3/2/1", counts(5)),
            Some(FaceVertex {
                point: 2,
                uv: Some(1),
                normal: Some(0),
            })
        );
        assert_eq!(
            parse_face_vertex("5//2", counts(5)),
            Some(FaceVertex {
                point: 4,
                uv: None,
                normal: Some(1),
            })
        );
    }

    #[test]
    fn test_parse_face_vertex_relative() {
        assert_eq!(
            parse_face_vertex("-1/-2/-3", (4, 6, 8)),
            Some(FaceVertex {
                point: 3,
                uv: Some(4),
                normal: Some(5),
            })
        );
    }

    #[test]
    fn test_parse_face_vertex_extra_fields() {
        // a normal is only read from exactly three fields
        assert_eq!(
            parse_face_vertex("1/2/3/4", counts(5)),
            Some(FaceVertex {
                point: 0,
                uv: Some(1),
                normal: None,
            })
        );
    }

    #[test]
    fn test_parse_face_vertex_unresolvable() {
        assert_eq!(parse_face_vertex("0", counts(3)), None);
        assert_eq!(parse_face_vertex("-4", counts(3)), None);
        assert_eq!(parse_face_vertex("x/1", counts(3)), None);
        assert_eq!(
            parse_face_vertex("1/x/-9", counts(3)),
            Some(FaceVertex::new(0))
        );
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index("1", 3), Some(0));
        assert_eq!(resolve_index("3", 3), Some(2));
        assert_eq!(resolve_index("-1", 3), Some(2));
        assert_eq!(resolve_index("-3", 3), Some(0));
        assert_eq!(resolve_index("", 3), None);
    }

    #[test]
    fn test_resolve_index_needs_whole_integer() {
        // no prefix parsing: trailing garbage or a fraction rejects the index
        assert_eq!(resolve_index("2.0", 3), None);
        assert_eq!(resolve_index("3abc", 3), None);
        assert_eq!(resolve_index("+2", 3), Some(1));
    }

    #[test]
    fn test_face_with_fractional_index_is_skipped() {
        let mut builder = ObjMeshBuilder::default();
        parse_token("v", &["0", "0", "0"], &mut builder);
        parse_token("v", &["1", "0", "0"], &mut builder);
        parse_token("v", &["0", "1", "0"], &mut builder);
        parse_token("f", &["1", "2.0", "3"], &mut builder);

        assert!(builder.submeshes.is_empty());
    }

    #[test]
    fn test_face_skipped_when_unresolvable() {
        let mut builder = ObjMeshBuilder::default();
        parse_token("v", &["0", "0", "0"], &mut builder);
        parse_token("f", &["1", "2", "-7"], &mut builder);

        assert!(builder.submeshes.is_empty());
    }
}
