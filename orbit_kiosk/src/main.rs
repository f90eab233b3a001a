//! orbit_kiosk — interactive entry point.

use orbit_kiosk::controller::{run, KioskConfig};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Orbit Kiosk — Gesture-Controlled Home Screen          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hand tracking");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Mouse simulation  (use --features leap for hardware)");
    println!();

    let cfg = parse_args();

    println!("  Controls:");
    println!("    hover + pinch   activate a circle (left mouse button = pinch)");
    println!("    Esc             leave an app");
    println!("    Q               quit");
    println!();
    println!("  Voice commands (type into this terminal):");
    println!("    open home / close home");
    println!("    run app 3            (text viewer)");
    println!("    run the cooking app");
    println!("    run app 7            (guitar tuner)");
    println!();
    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn parse_args() -> KioskConfig {
    let mut size: Option<(usize, usize)> = None;
    let mut circles: Option<usize> = None;
    let mut audio_dir: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--size" => size = args.next().and_then(|v| parse_size(&v)),
            "--circles" => circles = args.next().and_then(|v| v.parse().ok()),
            "--audio-dir" => audio_dir = args.next(),
            other => eprintln!("  ⚠  Unknown option {:?} ignored", other),
        }
    }

    let mut cfg = match size {
        Some((w, h)) => KioskConfig::for_size(w, h),
        None => KioskConfig::default(),
    };
    if let Some(n) = circles {
        cfg.ring_count = n.clamp(1, 16);
    }
    if let Some(dir) = audio_dir {
        cfg.audio_dir = dir.into();
    }
    println!(
        "  Layout: {}×{}, {} app circles",
        cfg.screen_w, cfg.screen_h, cfg.ring_count
    );
    cfg
}

/// "1280x720" → (1280, 720).
fn parse_size(v: &str) -> Option<(usize, usize)> {
    let (w, h) = v.split_once(['x', 'X'])?;
    Some((w.parse().ok()?, h.parse().ok()?))
}
