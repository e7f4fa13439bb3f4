//! The built-in diagram batch: four independent models describing the
//! HFTPerformance framework, sharing one palette and font set. Positions are
//! explicit data; nothing here is auto-laid-out.

use crate::fonts::FontRole;
use crate::models::{
    bounds, pt, ArrowSpec, Bounds, ComponentBox, DiagramModel, Endpoint, Legend, LegendEntry,
    Point, Section, Shape, Side, Text,
};
use crate::palette::{Color, Palette};
use crate::primitives::{estimate_text_width, rect_outline, rounded_rect};

/// Output file names paired with their models, in generation order.
pub fn all(palette: &Palette) -> Vec<(&'static str, DiagramModel)> {
    vec![
        ("architecture_diagram.png", overview(palette)),
        ("component_flow.png", component_flow(palette)),
        ("detailed_architecture.png", detailed(palette)),
        ("thread_sequence.png", thread_sequence(palette)),
    ]
}

fn at(x: f32, y: f32) -> Endpoint {
    Endpoint::at(x, y)
}

fn anchor(node: &str, side: Side) -> Endpoint {
    Endpoint::anchor(node, side)
}

fn anchor_off(node: &str, side: Side, offset: f32) -> Endpoint {
    Endpoint::anchor_offset(node, side, offset)
}

/// Accent-titled panel frame: rounded border plus a heading in the accent
/// color. Content shapes are appended by the caller.
fn panel(rect: Bounds, title: &str, accent: Color, fill: Color, out: &mut Vec<Shape>) {
    out.extend(rounded_rect(rect, 6.0, fill, Some(accent), 2.0));
    out.push(Shape::Text(Text::new(
        pt(rect.min_x() + 10.0, rect.min_y() + 8.0),
        title,
        FontRole::Header,
        accent,
    )));
}

fn text_rows(
    origin: Point,
    lines: &[&str],
    pitch: f32,
    font: FontRole,
    color: Color,
    out: &mut Vec<Shape>,
) {
    for (i, line) in lines.iter().enumerate() {
        out.push(Shape::Text(Text::new(
            pt(origin.x, origin.y + i as f32 * pitch),
            *line,
            font,
            color,
        )));
    }
}

// ---------------------------------------------------------------------------
// Figure 1: system architecture overview
// ---------------------------------------------------------------------------

fn overview(p: &Palette) -> DiagramModel {
    let mut m = DiagramModel::new(1400, 1000, p.background);

    m.free_text = vec![
        Text::new(
            pt(450.0, 20.0),
            "HFTPerformance Architecture",
            FontRole::Title,
            p.foreground,
        ),
        Text::new(
            pt(520.0, 55.0),
            "Figure 1: System Components Overview",
            FontRole::Body,
            p.secondary,
        ),
    ];

    m.boxes = vec![
        ComponentBox::new("config", bounds(50.0, 100.0, 200.0, 140.0), "Config Engine", p.warning, p)
            .icon("⚙")
            .items(["JSON Parser", "Mode Selection", "Advanced Options", "Validation"]),
        ComponentBox::new("strategy", bounds(50.0, 270.0, 200.0, 120.0), "User Strategy", p.success, p)
            .icon("📊")
            .items(["onTick() callback", "onOrderResponse()", "Custom Logic"]),
        ComponentBox::new("market-data", bounds(320.0, 100.0, 280.0, 160.0), "Market Data Generator", p.accent, p)
            .icon("📈")
            .items([
                "Tick Generation",
                "Multi-Symbol Round-Robin",
                "Gap Recovery Simulation",
                "Jitter Injection",
                "Rate Control (Poisson/Uniform)",
            ]),
        ComponentBox::new("matching", bounds(320.0, 290.0, 280.0, 180.0), "Matching Engine", p.error, p)
            .icon("⚡")
            .items([
                "Price-Time Priority",
                "Order Book Management",
                "Lock-free Queues",
                "Trade Execution",
                "Fill Simulation",
                "Multi-instrument Support",
            ]),
        ComponentBox::new("stats", bounds(320.0, 500.0, 280.0, 140.0), "Statistics Collector", p.success, p)
            .icon("📉")
            .items([
                "Latency Measurement",
                "Percentile Calculation",
                "Throughput Tracking",
                "Warmup Filtering",
            ]),
        ComponentBox::new("transport", bounds(670.0, 100.0, 220.0, 140.0), "Transport Layer", p.accent_alt, p)
            .icon("🔌")
            .items([
                "UDP Multicast",
                "IPC Unix Sockets",
                "Lock-free SPSC Queue",
                "Zero-copy Transfer",
            ]),
        ComponentBox::new("pipeline", bounds(670.0, 270.0, 220.0, 140.0), "Pipeline Executor", p.warning, p)
            .icon("🔄")
            .items([
                "Multi-threaded Stages",
                "CPU Affinity Pinning",
                "Busy-wait Polling",
                "Memory Locking",
            ]),
        ComponentBox::new("reporter", bounds(670.0, 440.0, 220.0, 160.0), "Output Reporter", p.accent, p)
            .icon("📋")
            .items([
                "Console Progress",
                "CSV Export",
                "Summary Line",
                "Flame Graph (perf)",
                "Detailed Statistics",
            ]),
        ComponentBox::new("your-system", bounds(940.0, 140.0, 180.0, 70.0), "Your Trading System", p.secondary, p)
            .icon("🖥")
            .items(["Custom Strategy"]),
        ComponentBox::new("exchange", bounds(1140.0, 140.0, 180.0, 70.0), "External Exchange", p.secondary, p)
            .icon("🏦")
            .items(["Real/Simulated"]),
    ];

    // The optional external-mode region: a plain frame around the two
    // external boxes, headed in the muted color.
    let mut external = Section::new(pt(940.0, 110.0), "External Mode (Optional)", 0.0, p);
    external.heading_color = p.secondary;
    external.children = rect_outline(bounds(920.0, 100.0, 430.0, 200.0), p.secondary, 1.0);
    m.sections.push(external);

    let mut summary = Section::new(pt(70.0, 795.0), "Data Flow:", 0.0, p);
    summary.children = rect_outline(bounds(50.0, 780.0, 1300.0, 190.0), p.border, 1.0);
    text_rows(
        pt(70.0, 825.0),
        &[
            "1. Config Engine loads JSON settings and initializes all components",
            "2. Market Data Generator produces realistic tick data with configurable patterns",
            "3. User Strategy (embedded) or External System processes ticks and generates orders",
            "4. Matching Engine executes orders using price-time priority",
            "5. Statistics Collector measures end-to-end latency at nanosecond precision",
            "6. Output Reporter generates detailed results and optional flame graphs",
        ],
        20.0,
        FontRole::Small,
        p.secondary,
        &mut summary.children,
    );
    m.sections.push(summary);

    m.arrows = vec![
        ArrowSpec::new(anchor("config", Side::Right), at(320.0, 170.0), p.warning).label("config"),
        ArrowSpec::new(anchor("config", Side::Bottom), anchor("strategy", Side::Top), p.warning),
        ArrowSpec::new(anchor("strategy", Side::Right), anchor("matching", Side::Left), p.success)
            .label("orders"),
        ArrowSpec::new(
            anchor_off("market-data", Side::Left, 20.0),
            anchor_off("strategy", Side::Right, -40.0),
            p.accent,
        )
        .label("ticks"),
        ArrowSpec::new(anchor("market-data", Side::Bottom), anchor("matching", Side::Top), p.accent)
            .label("ticks"),
        ArrowSpec::new(anchor("matching", Side::Bottom), anchor("stats", Side::Top), p.error)
            .label("latency"),
        ArrowSpec::new(anchor("matching", Side::Right), anchor("pipeline", Side::Left), p.accent_alt)
            .dashed(),
        ArrowSpec::new(anchor("transport", Side::Bottom), anchor("pipeline", Side::Top), p.accent_alt),
        ArrowSpec::new(anchor("pipeline", Side::Left), anchor("matching", Side::Right), p.warning)
            .label("orders"),
        ArrowSpec::new(anchor("stats", Side::Right), anchor("reporter", Side::Left), p.success)
            .label("stats"),
        ArrowSpec::new(anchor("transport", Side::Right), anchor("your-system", Side::Left), p.accent_alt)
            .label("UDP")
            .dashed(),
        ArrowSpec::new(
            anchor_off("your-system", Side::Left, 20.0),
            anchor_off("transport", Side::Right, 20.0),
            p.secondary,
        )
        .label("IPC")
        .dashed(),
    ];

    m.legend = Some(Legend::new(
        pt(50.0, 680.0),
        p,
        vec![
            LegendEntry::new(p.accent, "Data Generation"),
            LegendEntry::new(p.error, "Order Processing"),
            LegendEntry::new(p.success, "Strategy/Stats"),
            LegendEntry::new(p.warning, "Config/Pipeline"),
            LegendEntry::new(p.accent_alt, "Transport"),
            LegendEntry::new(p.secondary, "External (Optional)"),
        ],
    ));

    m
}

// ---------------------------------------------------------------------------
// Figure 1b: condensed component flow
// ---------------------------------------------------------------------------

fn component_flow(p: &Palette) -> DiagramModel {
    let mut m = DiagramModel::new(1200, 600, p.background);

    m.free_text = vec![Text::new(
        pt(400.0, 20.0),
        "HFTPerformance Component Flow",
        FontRole::Title,
        p.foreground,
    )];

    let stages: [(&str, &str, Color); 6] = [
        ("config", "Config\n(.json)", p.warning),
        ("market-data", "Market Data\nGenerator", p.accent),
        ("strategy", "Strategy\n(User/Built-in)", p.success),
        ("matching", "Matching\nEngine", p.error),
        ("stats", "Statistics\nCollector", p.success),
        ("reporter", "Output\n(CSV/Console)", p.accent),
    ];
    let xs = [50.0, 200.0, 400.0, 600.0, 800.0, 1000.0];

    for ((id, label, color), x) in stages.iter().zip(xs) {
        m.boxes.push(ComponentBox::label_box(
            *id,
            bounds(x, 250.0, 140.0, 80.0),
            *label,
            *color,
            p,
        ));
    }
    for window in [
        ("config", "market-data"),
        ("market-data", "strategy"),
        ("strategy", "matching"),
        ("matching", "stats"),
        ("stats", "reporter"),
    ] {
        m.arrows.push(
            ArrowSpec::new(anchor(window.0, Side::Right), anchor(window.1, Side::Left), p.secondary)
                .head_size(8.0),
        );
    }

    // Stage labels sit just past each box edge rather than on the arrow
    // midpoint (the first gap is only ten pixels wide).
    for (label, x) in ["parse", "ticks", "orders", "latency", "stats"].iter().zip(xs) {
        m.free_text.push(Text::new(
            pt(x + 150.0, 270.0),
            *label,
            FontRole::Small,
            p.secondary,
        ));
    }
    m.free_text.push(Text::new(
        pt(350.0, 400.0),
        "Latency measured end-to-end: tick arrival → order execution → statistics",
        FontRole::Body,
        p.secondary,
    ));

    m
}

// ---------------------------------------------------------------------------
// Figure 2: detailed thread/timing architecture
// ---------------------------------------------------------------------------

fn detailed(p: &Palette) -> DiagramModel {
    let mut m = DiagramModel::new(1600, 1400, p.background);

    m.free_text = vec![
        Text::new(
            pt(480.0, 15.0),
            "HFTPerformance Detailed Architecture",
            FontRole::Title,
            p.foreground,
        ),
        Text::new(
            pt(520.0, 50.0),
            "Figure 2: Thread Interactions, Timing, and Data Flow",
            FontRole::Body,
            p.secondary,
        ),
        Text::new(
            pt(600.0, 1370.0),
            "HFTPerformance v1.0 - Low-Latency Performance Testing Framework",
            FontRole::Small,
            p.secondary,
        ),
    ];

    // -- Section 1: thread model ------------------------------------------
    let mut threads = Section::new(pt(50.0, 90.0), "Thread Model & CPU Affinity", 300.0, p);
    spsc_queue_glyph(bounds(330.0, 320.0, 120.0, 25.0), "SPSC Queue", "64K", p, &mut threads.children);
    m.sections.push(threads);

    m.boxes.extend([
        ComponentBox::new("gen-thread", bounds(50.0, 125.0, 280.0, 180.0), "Thread 0: Generator", p.accent, p)
            .compact()
            .badge("CPU 0")
            .items([
                "Market data generation",
                "Tick timestamping (T0)",
                "Gap recovery injection",
                "Jitter simulation",
                "Rate control loop",
                "Warmup period tracking",
            ]),
        ComponentBox::new("proc-thread", bounds(370.0, 125.0, 280.0, 180.0), "Thread 1: Processor", p.error, p)
            .compact()
            .badge("CPU 1")
            .items([
                "Order book matching",
                "Lock-free queue drain",
                "Fill simulation",
                "Latency measurement (T1)",
                "Statistics aggregation",
                "Busy-wait polling",
            ]),
        ComponentBox::new("report-thread", bounds(690.0, 125.0, 280.0, 180.0), "Thread 2: Reporter", p.success, p)
            .compact()
            .badge("CPU 2")
            .items([
                "Progress output",
                "CSV logging",
                "Percentile calculation",
                "Summary generation",
                "(Lower priority)",
                "Non-critical path",
            ]),
    ]);

    m.arrows.extend([
        ArrowSpec::new(at(280.0, 235.0), at(330.0, 332.0), p.accent_alt)
            .label("enqueue")
            .head_size(8.0)
            .dashed()
            .dash_pattern(6.0, 4.0),
        ArrowSpec::new(at(450.0, 332.0), at(420.0, 235.0), p.accent_alt)
            .label("dequeue")
            .head_size(8.0)
            .dashed()
            .dash_pattern(6.0, 4.0),
    ]);

    // -- Section 2: lock-free synchronization -----------------------------
    let mut sync = Section::new(pt(50.0, 320.0), "Lock-Free Synchronization", 300.0, p);
    panel(bounds(50.0, 355.0, 400.0, 200.0), "SPSC Queue Implementation", p.accent_alt, p.box_background, &mut sync.children);
    text_rows(
        pt(65.0, 390.0),
        &[
            "template<typename T, size_t Capacity>",
            "class SPSCQueue {",
            "  alignas(64) atomic<size_t> head_;  // Producer",
            "  alignas(64) atomic<size_t> tail_;  // Consumer",
            "  alignas(64) size_t cached_head_;   // Local cache",
            "  alignas(64) size_t cached_tail_;   // Local cache",
            "  T buffer_[Capacity];",
            "",
            "  bool try_push(T& item) {",
            "    // memory_order_relaxed for hot path",
            "    // memory_order_release on commit",
            "  }",
            "};",
        ],
        14.0,
        FontRole::Code,
        p.code,
        &mut sync.children,
    );
    panel(bounds(480.0, 355.0, 300.0, 200.0), "Adaptive Spinlock", p.warning, p.box_background, &mut sync.children);
    text_rows(
        pt(495.0, 390.0),
        &[
            "class Spinlock {",
            "  atomic<bool> locked_{false};",
            "",
            "  void lock() {",
            "    // Fast path: single CAS",
            "    if (!locked_.exchange(true,",
            "        memory_order_acquire))",
            "      return;",
            "    // Slow path: exponential backoff",
            "    lock_slow();  // PAUSE + yield",
            "  }",
            "};",
        ],
        14.0,
        FontRole::Code,
        p.code,
        &mut sync.children,
    );
    m.sections.push(sync);

    // -- Section 3: timing precision --------------------------------------
    let mut timing = Section::new(pt(50.0, 560.0), "Timing & Measurement Precision", 330.0, p);
    panel(bounds(50.0, 595.0, 380.0, 130.0), "⏱ High-Resolution Timing", p.highlight, p.panel_background, &mut timing.children);
    text_rows(
        pt(65.0, 630.0),
        &[
            "rdtsc / clock_gettime(CLOCK_MONOTONIC)",
            "atomic_thread_fence(memory_order_seq_cst)",
            "Timestamp t0 = now();  // ~15ns overhead",
            "/* critical path */",
            "Timestamp t1 = now();",
            "latency_ns = t1 - t0;  // nanosecond precision",
        ],
        16.0,
        FontRole::Code,
        p.code,
        &mut timing.children,
    );

    panel(bounds(480.0, 595.0, 500.0, 130.0), "📊 Latency Measurement Points", p.highlight, p.panel_background, &mut timing.children);
    timing.children.push(Shape::Line {
        from: pt(510.0, 645.0),
        to: pt(950.0, 645.0),
        color: p.secondary,
        width: 2.0,
    });
    let points: [(f32, [&str; 2], Color); 5] = [
        (530.0, ["T0: Tick", "Generated"], p.accent),
        (630.0, ["T1: Queue", "Enqueue"], p.accent_alt),
        (730.0, ["T2: Queue", "Dequeue"], p.accent_alt),
        (830.0, ["T3: Match", "Complete"], p.error),
        (930.0, ["T4: Stats", "Recorded"], p.success),
    ];
    for (px, labels, color) in points {
        timing.children.push(Shape::Ellipse {
            bounds: bounds(px - 6.0, 639.0, 12.0, 12.0),
            fill: color,
            outline: None,
        });
        text_rows(pt(px - 25.0, 657.0), &labels, 12.0, FontRole::Small, p.secondary, &mut timing.children);
    }
    timing.children.push(Shape::Line {
        from: pt(530.0, 630.0),
        to: pt(830.0, 630.0),
        color: p.error,
        width: 2.0,
    });
    timing.children.push(Shape::Text(Text::new(
        pt(650.0, 617.0),
        "End-to-End Latency",
        FontRole::Small,
        p.error,
    )));
    m.sections.push(timing);

    // -- Section 4: memory layout -----------------------------------------
    let mut memory = Section::new(pt(50.0, 720.0), "Memory Layout & Cache Optimization", 370.0, p);
    panel(bounds(50.0, 755.0, 350.0, 140.0), "🧠 Cache-Aligned Memory Layout", p.warning, p.panel_background, &mut memory.children);
    let rows: [(&str, &str, Color); 4] = [
        ("Order struct", "64B aligned", p.success),
        ("SPSC Queue head", "64B padding", p.accent),
        ("SPSC Queue tail", "64B padding", p.accent),
        ("Price Level", "128B aligned", p.error),
    ];
    for (i, (label, size, color)) in rows.into_iter().enumerate() {
        let y = 793.0 + i as f32 * 25.0;
        memory.children.push(Shape::Rect {
            bounds: bounds(65.0, y, 255.0, 21.0),
            fill: color,
        });
        memory.children.extend(rect_outline(bounds(65.0, y, 255.0, 21.0), p.foreground, 1.0));
        memory.children.push(Shape::Text(Text::new(pt(70.0, y + 4.0), label, FontRole::Small, p.foreground)));
        memory.children.push(Shape::Text(Text::new(pt(325.0, y + 4.0), size, FontRole::Small, p.secondary)));
    }

    panel(bounds(480.0, 755.0, 350.0, 175.0), "🚫 False Sharing Prevention", p.error, p.panel_background, &mut memory.children);
    text_rows(
        pt(495.0, 790.0),
        &[
            "• Each atomic variable on separate cache line",
            "• alignas(64) / alignas(128) annotations",
            "• Producer/Consumer data isolated",
            "• Hot data packed together",
            "• Cold data (stats) on separate lines",
            "• Memory prefetching hints (likely/unlikely)",
        ],
        18.0,
        FontRole::Body,
        p.secondary,
        &mut memory.children,
    );
    m.sections.push(memory);

    // -- Section 5: pipeline data flow ------------------------------------
    let mut flow = Section::new(pt(50.0, 910.0), "Detailed Data Flow (Pipeline Mode)", 370.0, p);
    flow.children.push(Shape::Text(Text::new(
        pt(50.0, 1010.0),
        "──── Thread 0 (Generator) ────",
        FontRole::Small,
        p.accent,
    )));
    flow.children.push(Shape::Text(Text::new(
        pt(600.0, 1010.0),
        "──── Thread 1 (Processor) ────",
        FontRole::Small,
        p.error,
    )));
    m.sections.push(flow);

    let stages: [(&str, &str, Color); 10] = [
        ("flow-config", "Config\nParse", p.warning),
        ("flow-symbols", "Symbol\nSetup", p.warning),
        ("flow-tick", "Tick\nGenerate", p.accent),
        ("flow-t0", "Timestamp\nT0", p.highlight),
        ("flow-push", "Queue\nPush", p.accent_alt),
        ("flow-pop", "Queue\nPop", p.accent_alt),
        ("flow-match", "Order\nMatch", p.error),
        ("flow-t1", "Timestamp\nT1", p.highlight),
        ("flow-record", "Stats\nRecord", p.success),
        ("flow-report", "Report\nOutput", p.success),
    ];
    for (i, (id, label, color)) in stages.iter().enumerate() {
        let x = 50.0 + i as f32 * 110.0;
        let mut b = ComponentBox::label_box(*id, bounds(x, 950.0, 80.0, 50.0), *label, *color, p)
            .item_font(FontRole::Small)
            .item_pitch(14.0);
        b.radius = 4.0;
        m.boxes.push(b);
    }
    for pair in stages.windows(2) {
        m.arrows.push(
            ArrowSpec::new(anchor(pair[0].0, Side::Right), anchor(pair[1].0, Side::Left), p.secondary)
                .head_size(8.0),
        );
    }

    // -- Section 6: optimizations + key metrics ---------------------------
    let mut opts = Section::new(pt(50.0, 1030.0), "Performance Optimizations", 270.0, p);
    panel(bounds(700.0, 1200.0, 450.0, 70.0), "Key Performance Metrics", p.highlight, p.panel_background, &mut opts.children);
    text_rows(
        pt(715.0, 1232.0),
        &[
            "• Timing overhead: ~15-20ns per measurement",
            "• Queue latency: ~50-100ns (cache-hot)",
            "• Context switch avoidance: busy-wait polling",
        ],
        14.0,
        FontRole::Small,
        p.secondary,
        &mut opts.children,
    );
    m.sections.push(opts);

    let opt_boxes: [(&str, &str, [&str; 4], Color); 4] = [
        ("opt-affinity", "CPU Affinity", [
            "pthread_setaffinity_np()",
            "Isolate threads to cores",
            "Prevent migration overhead",
            "NUMA-aware allocation",
        ], p.accent),
        ("opt-mlock", "Memory Locking", [
            "mlockall(MCL_CURRENT)",
            "mlockall(MCL_FUTURE)",
            "Prevent page faults",
            "Pre-fault allocations",
        ], p.success),
        ("opt-poll", "Busy-Wait Polling", [
            "_mm_pause() / yield",
            "Exponential backoff",
            "No syscall overhead",
            "Sub-microsecond wake",
        ], p.warning),
        ("opt-branch", "Branch Prediction", [
            "__builtin_expect()",
            "likely() / unlikely()",
            "Hot path optimization",
            "Profile-guided layout",
        ], p.error),
    ];
    for (i, (id, title, items, color)) in opt_boxes.into_iter().enumerate() {
        let x = 50.0 + i as f32 * 250.0;
        let mut b = ComponentBox::new(id, bounds(x, 1065.0, 220.0, 115.0), title, color, p)
            .compact()
            .items(items)
            .item_font(FontRole::Small);
        b.header_height = 20.0;
        b.item_start = 30.0;
        m.boxes.push(b);
    }

    let mut legend = Legend::new(
        pt(50.0, 1200.0),
        p,
        vec![
            LegendEntry::new(p.accent, "Data Generation"),
            LegendEntry::new(p.error, "Order Processing"),
            LegendEntry::new(p.success, "Statistics/Output"),
            LegendEntry::new(p.warning, "Config/Control"),
            LegendEntry::new(p.accent_alt, "Lock-free Queues"),
            LegendEntry::new(p.highlight, "Timing/Measurement"),
        ],
    );
    legend.col_width = 200.0;
    legend.row_pitch = 22.0;
    m.legend = Some(legend);

    m
}

/// The little eight-slot lock-free queue glyph: body, occupancy slots and
/// side labels.
fn spsc_queue_glyph(rect: Bounds, label: &str, size: &str, p: &Palette, out: &mut Vec<Shape>) {
    out.push(Shape::Rect {
        bounds: rect,
        fill: p.panel_background,
    });
    out.extend(rect_outline(rect, p.accent_alt, 2.0));
    let slot_w = rect.size.width / 8.0;
    for i in 0..8 {
        let fill = if i < 5 { p.success } else { p.badge_background };
        out.push(Shape::Rect {
            bounds: bounds(
                rect.min_x() + i as f32 * slot_w + 2.0,
                rect.min_y() + 2.0,
                slot_w - 4.0,
                rect.size.height - 4.0,
            ),
            fill,
        });
    }
    out.push(Shape::Text(Text::new(
        pt(rect.min_x(), rect.min_y() - 15.0),
        label,
        FontRole::Small,
        p.accent_alt,
    )));
    out.push(Shape::Text(Text::new(
        pt(rect.max_x() + 5.0, rect.min_y() + rect.size.height / 2.0 - 6.0),
        size,
        FontRole::Small,
        p.secondary,
    )));
}

// ---------------------------------------------------------------------------
// Figure 2b: thread interaction sequence
// ---------------------------------------------------------------------------

fn thread_sequence(p: &Palette) -> DiagramModel {
    let mut m = DiagramModel::new(1400, 800, p.background);

    m.free_text = vec![
        Text::new(
            pt(450.0, 20.0),
            "Thread Interaction Sequence",
            FontRole::Title,
            p.foreground,
        ),
        Text::new(
            pt(480.0, 55.0),
            "Figure 2b: Message Passing Timeline",
            FontRole::Body,
            p.secondary,
        ),
        Text::new(pt(50.0, 160.0), "T=0", FontRole::Small, p.secondary),
        Text::new(pt(50.0, 320.0), "T=10µs", FontRole::Small, p.secondary),
        Text::new(pt(50.0, 480.0), "T=20µs", FontRole::Small, p.secondary),
        Text::new(pt(50.0, 640.0), "T=30µs", FontRole::Small, p.secondary),
        Text::new(
            pt(100.0, 720.0),
            "Note: Lock-free queue enables zero-blocking communication between threads",
            FontRole::Body,
            p.secondary,
        ),
    ];

    let lifelines: [(f32, &str, Color); 4] = [
        (150.0, "Main Thread\n(Generator)", p.accent),
        (450.0, "Worker Thread\n(Processor)", p.error),
        (750.0, "Stats Thread\n(Reporter)", p.success),
        (1050.0, "SPSC Queue", p.accent_alt),
    ];
    let mut timeline = Section::new(pt(0.0, 0.0), "", 0.0, p);
    for (x, label, color) in lifelines {
        timeline.children.push(Shape::Rect {
            bounds: bounds(x - 40.0, 100.0, 80.0, 30.0),
            fill: color,
        });
        for (i, line) in label.split('\n').enumerate() {
            let half = estimate_text_width(line, FontRole::Small) / 2.0;
            timeline.children.push(Shape::Text(Text::new(
                pt(x - half, 103.0 + i as f32 * 12.0),
                line,
                FontRole::Small,
                p.foreground,
            )));
        }
        timeline.children.push(Shape::Line {
            from: pt(x, 130.0),
            to: pt(x, 700.0),
            color,
            width: 2.0,
        });
    }

    // Self-calls are half-loops on the lifeline, not zero-length arrows
    // (those are a degenerate no-op by engine invariant).
    let self_calls: [(f32, f32, &str, Color); 5] = [
        (450.0, 240.0, "match(order)", p.error),
        (450.0, 400.0, "match(order)", p.error),
        (750.0, 440.0, "aggregate()", p.success),
        (150.0, 520.0, "check_gap_recovery()", p.warning),
        (750.0, 640.0, "report_progress()", p.success),
    ];
    for (x, y, label, color) in self_calls {
        timeline.children.push(Shape::Arc {
            bounds: bounds(x, y - 10.0, 40.0, 30.0),
            start_deg: 270.0,
            sweep_deg: 180.0,
            color,
            width: 2.0,
        });
        timeline.children.push(Shape::Text(Text::new(
            pt(x + 45.0, y - 5.0),
            label,
            FontRole::Small,
            color,
        )));
    }
    m.sections.push(timeline);

    let messages: [(f32, f32, f32, &str, Color); 8] = [
        (150.0, 1050.0, 160.0, "push(tick)", p.accent_alt),
        (1050.0, 450.0, 200.0, "pop() → tick", p.accent_alt),
        (450.0, 750.0, 280.0, "record(latency)", p.success),
        (150.0, 1050.0, 320.0, "push(tick)", p.accent_alt),
        (1050.0, 450.0, 360.0, "pop() → tick", p.accent_alt),
        (150.0, 1050.0, 480.0, "push(tick)", p.accent_alt),
        (150.0, 1050.0, 560.0, "burst_push(1000)", p.warning),
        (1050.0, 450.0, 600.0, "drain_queue()", p.accent_alt),
    ];
    for (x1, x2, y, label, color) in messages {
        m.arrows.push(
            ArrowSpec::new(at(x1, y), at(x2, y), color)
                .label(label)
                .head_size(8.0),
        );
    }

    m
}
