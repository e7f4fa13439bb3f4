#[cfg(test)]
mod geometry_tests {
    use crate::geom::{dash_segments, distance, polar};
    use crate::models::pt;

    #[test]
    fn test_polar_axes() {
        let (x, y) = polar((10.0_f32, 20.0), 0.0, 5.0);
        assert!((x - 15.0).abs() < 1e-4);
        assert!((y - 20.0).abs() < 1e-4);

        // Positive angles go downward in screen space.
        let (x, y) = polar((10.0_f32, 20.0), std::f32::consts::FRAC_PI_2, 5.0);
        assert!((x - 10.0).abs() < 1e-4);
        assert!((y - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_dash_segments_cover_expected_length() {
        let segments = dash_segments(pt(0.0, 0.0), pt(100.0, 0.0), 8.0, 4.0);
        assert!(!segments.is_empty());

        let drawn: f32 = segments
            .iter()
            .map(|(a, b)| distance((a.x, a.y), (b.x, b.y)))
            .sum();
        // 8 full dashes of a 12px period fit in 100px, plus a 4px partial.
        assert!((drawn - 68.0).abs() < 1e-3, "drawn length was {drawn}");

        for (a, b) in &segments {
            assert!(b.x <= 100.0 + 1e-3);
            assert_eq!(a.y, 0.0);
            assert_eq!(b.y, 0.0);
        }
    }

    #[test]
    fn test_dash_segments_degenerate() {
        assert!(dash_segments(pt(5.0, 5.0), pt(5.0, 5.0), 8.0, 4.0).is_empty());
        // A non-positive pattern degrades to one solid segment.
        let segments = dash_segments(pt(0.0, 0.0), pt(10.0, 0.0), 0.0, 0.0);
        assert_eq!(segments, vec![(pt(0.0, 0.0), pt(10.0, 0.0))]);
    }
}

#[cfg(test)]
mod primitive_tests {
    use crate::models::{bounds, pt, ArrowSpec, Endpoint, Shape};
    use crate::palette::rgb;
    use crate::primitives::{arrow_shapes, rect_outline, rounded_rect};

    fn count_matching(shapes: &[Shape], f: impl Fn(&Shape) -> bool) -> usize {
        shapes.iter().filter(|s| f(s)).count()
    }

    #[test]
    fn test_rounded_rect_decomposition() {
        let shapes = rounded_rect(
            bounds(0.0, 0.0, 100.0, 50.0),
            10.0,
            rgb(10, 10, 10),
            Some(rgb(200, 200, 200)),
            2.0,
        );

        // Fill: two strips and four corner disks.
        assert_eq!(count_matching(&shapes, |s| matches!(s, Shape::Rect { .. })), 2);
        assert_eq!(count_matching(&shapes, |s| matches!(s, Shape::Ellipse { .. })), 4);
        // Outline: four quadrant arcs and four edges.
        assert_eq!(count_matching(&shapes, |s| matches!(s, Shape::Arc { .. })), 4);
        assert_eq!(count_matching(&shapes, |s| matches!(s, Shape::Line { .. })), 4);

        for shape in &shapes {
            if let Shape::Arc { sweep_deg, .. } = shape {
                assert_eq!(*sweep_deg, 90.0);
            }
        }
    }

    #[test]
    fn test_rounded_rect_outline_is_continuous() {
        // Top-left arc must end exactly where the top edge starts.
        let shapes = rounded_rect(
            bounds(0.0, 0.0, 100.0, 50.0),
            10.0,
            rgb(0, 0, 0),
            Some(rgb(255, 255, 255)),
            1.0,
        );

        let top_edge = shapes
            .iter()
            .find_map(|s| match s {
                Shape::Line { from, to, .. } if from.y == 0.0 && to.y == 0.0 => Some((*from, *to)),
                _ => None,
            })
            .expect("top edge missing");
        assert_eq!(top_edge.0, pt(10.0, 0.0));
        assert_eq!(top_edge.1, pt(90.0, 0.0));

        let tl_arc = shapes
            .iter()
            .find_map(|s| match s {
                Shape::Arc { bounds, start_deg, .. } if *start_deg == 180.0 => Some(*bounds),
                _ => None,
            })
            .expect("top-left arc missing");
        // Arc endpoint at 270 degrees on a (0,0,20,20) bounding box is (10, 0).
        let cx = tl_arc.min_x() + tl_arc.size.width / 2.0;
        let cy = tl_arc.min_y() + tl_arc.size.height / 2.0;
        let end = 270.0_f32.to_radians();
        let ex = cx + tl_arc.size.width / 2.0 * end.cos();
        let ey = cy + tl_arc.size.height / 2.0 * end.sin();
        assert!((ex - 10.0).abs() < 1e-3);
        assert!(ey.abs() < 1e-3);
    }

    #[test]
    fn test_rounded_rect_radius_clamped() {
        // Radius larger than half the short side clamps to it.
        let shapes = rounded_rect(bounds(0.0, 0.0, 100.0, 20.0), 50.0, rgb(0, 0, 0), None, 1.0);
        for shape in &shapes {
            if let Shape::Ellipse { bounds, .. } = shape {
                assert_eq!(bounds.size.width, 20.0);
                assert_eq!(bounds.size.height, 20.0);
            }
        }
    }

    #[test]
    fn test_rounded_rect_zero_radius_is_plain_rect() {
        let shapes = rounded_rect(bounds(0.0, 0.0, 100.0, 50.0), 0.0, rgb(0, 0, 0), None, 1.0);
        assert_eq!(shapes.len(), 1);
        assert!(matches!(shapes[0], Shape::Rect { .. }));
    }

    #[test]
    fn test_rect_outline_four_edges() {
        let shapes = rect_outline(bounds(10.0, 10.0, 30.0, 20.0), rgb(255, 0, 0), 1.0);
        assert_eq!(shapes.len(), 4);
        assert!(shapes.iter().all(|s| matches!(s, Shape::Line { .. })));
    }

    #[test]
    fn test_arrow_head_geometry() {
        let spec = ArrowSpec::new(Endpoint::at(0.0, 0.0), Endpoint::at(100.0, 0.0), rgb(255, 0, 0));
        let shapes = arrow_shapes(pt(0.0, 0.0), pt(100.0, 0.0), &spec);

        let head = shapes
            .iter()
            .find_map(|s| match s {
                Shape::Polygon { points, .. } => Some(points.clone()),
                _ => None,
            })
            .expect("arrowhead missing");
        assert_eq!(head.len(), 3);
        // Apex sits exactly on the endpoint; base vertices one head-length back.
        assert_eq!(head[0], pt(100.0, 0.0));
        for base in &head[1..] {
            let d = ((base.x - 100.0).powi(2) + base.y.powi(2)).sqrt();
            assert!((d - spec.head_size).abs() < 1e-3, "base vertex distance {d}");
            assert!(base.x < 100.0);
        }
    }

    #[test]
    fn test_zero_length_arrow_renders_nothing() {
        let spec = ArrowSpec::new(Endpoint::at(5.0, 5.0), Endpoint::at(5.0, 5.0), rgb(255, 0, 0));
        assert!(arrow_shapes(pt(5.0, 5.0), pt(5.0, 5.0), &spec).is_empty());
    }

    #[test]
    fn test_dashed_arrow_shaft_stops_short_of_head() {
        let spec = ArrowSpec::new(Endpoint::at(0.0, 0.0), Endpoint::at(100.0, 0.0), rgb(255, 0, 0))
            .dashed();
        let shapes = arrow_shapes(pt(0.0, 0.0), pt(100.0, 0.0), &spec);

        let shaft_end = shapes
            .iter()
            .find_map(|s| match s {
                Shape::DashedLine { to, .. } => Some(*to),
                _ => None,
            })
            .expect("dashed shaft missing");
        assert!((shaft_end.x - (100.0 - spec.head_size)).abs() < 1e-3);
    }

    #[test]
    fn test_arrow_label_centered_above_midpoint() {
        let spec = ArrowSpec::new(Endpoint::at(0.0, 0.0), Endpoint::at(100.0, 0.0), rgb(255, 0, 0))
            .label("ticks");
        let shapes = arrow_shapes(pt(0.0, 0.0), pt(100.0, 0.0), &spec);

        let label = shapes
            .iter()
            .find_map(|s| match s {
                Shape::Text(t) => Some(t.clone()),
                _ => None,
            })
            .expect("label missing");
        assert_eq!(label.content, "ticks");
        assert!(label.origin.x < 50.0);
        assert_eq!(label.origin.y, -spec.head_size);
    }
}

#[cfg(test)]
mod compose_tests {
    use crate::compose::{component_box_shapes, lower, resolve_endpoint};
    use crate::models::{
        bounds, pt, ArrowSpec, ComponentBox, DiagramModel, Endpoint, Legend, LegendEntry, Shape,
        Side,
    };
    use crate::palette::Palette;
    use crate::primitives::arrow_shapes;

    fn two_box_model(palette: &Palette) -> DiagramModel {
        let mut model = DiagramModel::new(800, 600, palette.background);
        model.boxes = vec![
            ComponentBox::new("left", bounds(50.0, 100.0, 200.0, 140.0), "Left", palette.accent, palette)
                .items(["one", "two"]),
            ComponentBox::new("right", bounds(400.0, 100.0, 200.0, 140.0), "Right", palette.error, palette),
        ];
        model.arrows = vec![ArrowSpec::new(
            Endpoint::anchor("left", Side::Right),
            Endpoint::anchor("right", Side::Left),
            palette.accent,
        )
        .label("flow")];
        model.legend = Some(Legend::new(
            pt(50.0, 400.0),
            palette,
            vec![
                LegendEntry::new(palette.accent, "A"),
                LegendEntry::new(palette.error, "B"),
                LegendEntry::new(palette.success, "C"),
                LegendEntry::new(palette.warning, "D"),
            ],
        ));
        model
    }

    #[test]
    fn test_lower_starts_with_background() {
        let palette = Palette::default();
        let shapes = lower(&two_box_model(&palette));

        match &shapes[0] {
            Shape::Rect { bounds, fill } => {
                assert_eq!(bounds.size.width, 800.0);
                assert_eq!(bounds.size.height, 600.0);
                assert_eq!(*fill, palette.background);
            }
            other => panic!("background must be first, got {other:?}"),
        }
    }

    #[test]
    fn test_lower_draws_arrows_after_boxes() {
        let palette = Palette::default();
        let shapes = lower(&two_box_model(&palette));

        let last_box_fill = shapes
            .iter()
            .rposition(|s| matches!(s, Shape::Ellipse { .. }))
            .expect("corner disks missing");
        let head = shapes
            .iter()
            .position(|s| matches!(s, Shape::Polygon { .. }))
            .expect("arrowhead missing");
        assert!(head > last_box_fill, "arrow must draw above box fills");
    }

    #[test]
    fn test_lower_ends_with_legend_and_sums_parts() {
        let palette = Palette::default();
        let model = two_box_model(&palette);
        let shapes = lower(&model);

        // Legend entries lower last of all; the final shape is the last label.
        match shapes.last() {
            Some(Shape::Text(t)) => assert_eq!(t.content, "D"),
            other => panic!("legend label must be last, got {other:?}"),
        }

        // The lowered sequence is exactly background + boxes + arrows + legend.
        let mut expected = 1usize;
        for component in &model.boxes {
            let mut out = Vec::new();
            component_box_shapes(component, &mut out);
            expected += out.len();
        }
        for arrow in &model.arrows {
            let from = resolve_endpoint(&arrow.from, &model).unwrap();
            let to = resolve_endpoint(&arrow.to, &model).unwrap();
            expected += arrow_shapes(from, to, arrow).len();
        }
        let legend = model.legend.as_ref().unwrap();
        expected += 1 + 2 * legend.entries.len();
        assert_eq!(shapes.len(), expected);
    }

    #[test]
    fn test_lower_is_deterministic() {
        let palette = Palette::default();
        let model = two_box_model(&palette);
        assert_eq!(lower(&model), lower(&model));
    }

    #[test]
    fn test_resolve_anchor_sides() {
        let palette = Palette::default();
        let model = two_box_model(&palette);

        // "left" box is (50,100) 200x140; center (150, 170).
        let right = resolve_endpoint(&Endpoint::anchor("left", Side::Right), &model).unwrap();
        assert_eq!(right, pt(250.0, 170.0));
        let top = resolve_endpoint(&Endpoint::anchor("left", Side::Top), &model).unwrap();
        assert_eq!(top, pt(150.0, 100.0));
        let offset =
            resolve_endpoint(&Endpoint::anchor_offset("left", Side::Bottom, -20.0), &model)
                .unwrap();
        assert_eq!(offset, pt(130.0, 240.0));
    }

    #[test]
    fn test_unknown_anchor_skips_arrow() {
        let palette = Palette::default();
        let mut model = two_box_model(&palette);
        assert!(resolve_endpoint(&Endpoint::anchor("ghost", Side::Left), &model).is_none());

        // The bad arrow is dropped; the model still lowers.
        model.arrows.push(ArrowSpec::new(
            Endpoint::anchor("ghost", Side::Left),
            Endpoint::at(0.0, 0.0),
            palette.accent,
        ));
        let heads = lower(&model)
            .iter()
            .filter(|s| matches!(s, Shape::Polygon { .. }))
            .count();
        assert_eq!(heads, 1);
    }

    #[test]
    fn test_component_box_item_layout() {
        let palette = Palette::default();
        let component = ComponentBox::new(
            "b",
            bounds(0.0, 0.0, 260.0, 140.0),
            "Box",
            palette.accent,
            &palette,
        )
        .items(["first", "second", "third"]);

        let mut shapes = Vec::new();
        component_box_shapes(&component, &mut shapes);

        let items: Vec<_> = shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text(t) if t.content.starts_with('•') => Some(t.origin),
                _ => None,
            })
            .collect();
        assert_eq!(items.len(), 3);
        for (i, origin) in items.iter().enumerate() {
            assert_eq!(origin.x, 15.0);
            assert_eq!(origin.y, component.item_start + i as f32 * component.item_pitch);
            assert!(origin.y < 140.0, "item text escapes the box");
        }
    }

    #[test]
    fn test_label_box_centers_title_lines() {
        let palette = Palette::default();
        let component = ComponentBox::label_box(
            "b",
            bounds(100.0, 100.0, 140.0, 80.0),
            "Matching\nEngine",
            palette.error,
            &palette,
        );

        let mut shapes = Vec::new();
        component_box_shapes(&component, &mut shapes);

        let lines: Vec<_> = shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text(t) => Some(t.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].content, "Matching");
        assert_eq!(lines[1].content, "Engine");
        assert_eq!(lines[1].origin.y - lines[0].origin.y, component.item_pitch);
        // Both lines centered around the box's vertical axis.
        for line in &lines {
            assert!(line.origin.x > 100.0 && line.origin.x < 240.0);
        }
    }

    #[test]
    fn test_legend_wraps_after_three_entries() {
        let palette = Palette::default();
        let shapes = lower(&two_box_model(&palette));

        let swatches: Vec<_> = shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Rect { bounds, .. } if bounds.size.width == 15.0 => Some(bounds.origin),
                _ => None,
            })
            .collect();
        assert_eq!(swatches.len(), 4);
        assert_eq!(swatches[0], pt(50.0, 430.0));
        assert_eq!(swatches[2], pt(50.0 + 2.0 * 220.0, 430.0));
        // Fourth entry starts a second row.
        assert_eq!(swatches[3], pt(50.0, 455.0));
    }
}

#[cfg(test)]
mod render_tests {
    use crate::compose::lower;
    use crate::fonts::FontSet;
    use crate::models::{bounds, ComponentBox, DiagramModel};
    use crate::palette::Palette;
    use crate::renderer_skia::rasterize;
    use crate::renderer_svg::generate_svg;

    fn small_model(palette: &Palette) -> DiagramModel {
        let mut model = DiagramModel::new(200, 150, palette.background);
        model.boxes = vec![ComponentBox::new(
            "a",
            bounds(20.0, 20.0, 120.0, 80.0),
            "Box",
            palette.accent,
            palette,
        )
        .items(["item"])];
        model
    }

    #[test]
    fn test_rasterize_matches_model_dimensions() {
        let palette = Palette::default();
        let model = small_model(&palette);
        let shapes = lower(&model);

        // Geometry-only rendering; no fonts required.
        let pixmap = rasterize(&shapes, model.width, model.height, &FontSet::empty()).unwrap();
        assert_eq!(pixmap.width(), 200);
        assert_eq!(pixmap.height(), 150);

        let corner = pixmap.pixel(0, 0).unwrap();
        assert_eq!(corner.red(), palette.background.red);
        assert_eq!(corner.blue(), palette.background.blue);
    }

    #[test]
    fn test_generate_svg_basic() {
        let palette = Palette::default();
        let svg = generate_svg(&small_model(&palette));

        assert!(svg.contains("<svg"));
        assert!(svg.contains("viewBox=\"0 0 200 150\""));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("<ellipse"));
        assert!(svg.contains("<text"));
        assert!(svg.contains("Box"));
    }

    #[test]
    fn test_convert_svg_to_png_writes_artifact() {
        let palette = Palette::default();
        let svg = generate_svg(&small_model(&palette));
        let path = std::env::temp_dir().join("archfig_legacy_render.png");

        crate::converter::convert_svg_to_png(&svg, &path, 50).unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data[1..4], b"PNG");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_generate_svg_dashed_arrows_use_dasharray() {
        let palette = Palette::default();
        let mut model = small_model(&palette);
        model.arrows.push(
            crate::models::ArrowSpec::new(
                crate::models::Endpoint::at(10.0, 140.0),
                crate::models::Endpoint::at(190.0, 140.0),
                palette.accent,
            )
            .dashed(),
        );

        let svg = generate_svg(&model);
        assert_eq!(svg.matches("stroke-dasharray=\"8,4\"").count(), 1);
        assert!(svg.contains("<polygon"));
    }

    #[test]
    fn test_svg_escapes_text() {
        let palette = Palette::default();
        let mut model = small_model(&palette);
        model.free_text.push(crate::models::Text::new(
            crate::models::pt(10.0, 120.0),
            "a < b & c",
            crate::fonts::FontRole::Small,
            palette.secondary,
        ));

        let svg = generate_svg(&model);
        assert!(svg.contains("a &lt; b &amp; c"));
    }
}

#[cfg(test)]
mod palette_tests {
    use crate::palette::{format_color, parse_color, Palette};
    use palette::Srgba;

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("#58a6ff"), Srgba::new(0x58, 0xa6, 0xff, 255));
        assert_eq!(parse_color("58a6ff"), Srgba::new(0x58, 0xa6, 0xff, 255));
        assert_eq!(parse_color("#58a6ff80"), Srgba::new(0x58, 0xa6, 0xff, 0x80));
        assert_eq!(parse_color("transparent"), Srgba::new(0, 0, 0, 0));
        assert_eq!(parse_color(""), Srgba::new(0, 0, 0, 0));
        assert_eq!(parse_color("not-a-color"), Srgba::new(0, 0, 0, 255));
    }

    #[test]
    fn test_format_color_roundtrip() {
        assert_eq!(format_color(&parse_color("#f85149")), "#f85149");
        assert_eq!(format_color(&parse_color("#f8514980")), "#f8514980");
    }

    #[test]
    fn test_theme_override_keeps_defaults_for_missing_fields() {
        let theme = Palette::from_json(r##"{"background": "#000000", "accent": "#ff00ff"}"##)
            .expect("valid theme JSON");
        assert_eq!(theme.background, parse_color("#000000"));
        assert_eq!(theme.accent, parse_color("#ff00ff"));
        assert_eq!(theme.error, Palette::default().error);
    }
}

#[cfg(test)]
mod diagram_tests {
    use crate::compose::lower;
    use crate::diagrams;
    use crate::models::Shape;
    use crate::palette::Palette;

    #[test]
    fn test_batch_has_four_artifacts() {
        let palette = Palette::default();
        let batch = diagrams::all(&palette);

        let names: Vec<_> = batch.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "architecture_diagram.png",
                "component_flow.png",
                "detailed_architecture.png",
                "thread_sequence.png",
            ]
        );
    }

    #[test]
    fn test_every_model_lowers_with_background_first() {
        let palette = Palette::default();
        for (name, model) in diagrams::all(&palette) {
            let shapes = lower(&model);
            assert!(shapes.len() > 1, "{name} produced no content");
            match &shapes[0] {
                Shape::Rect { bounds, fill } => {
                    assert_eq!(bounds.size.width, model.width as f32, "{name}");
                    assert_eq!(bounds.size.height, model.height as f32, "{name}");
                    assert_eq!(*fill, palette.background, "{name}");
                }
                other => panic!("{name}: background must be first, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_every_arrow_anchor_resolves() {
        let palette = Palette::default();
        for (name, model) in diagrams::all(&palette) {
            for arrow in &model.arrows {
                for endpoint in [&arrow.from, &arrow.to] {
                    assert!(
                        crate::compose::resolve_endpoint(endpoint, &model).is_some(),
                        "{name}: dangling anchor {endpoint:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_overview_legend_and_boxes_present() {
        let palette = Palette::default();
        let batch = diagrams::all(&palette);
        let (_, overview) = &batch[0];

        assert_eq!(overview.boxes.len(), 10);
        assert_eq!(overview.arrows.len(), 12);
        let legend = overview.legend.as_ref().expect("overview has a legend");
        assert_eq!(legend.entries.len(), 6);
    }
}
