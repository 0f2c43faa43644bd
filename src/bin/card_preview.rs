//! 内容卡片预览工具
//!
//! card-preview <payload.json> [--width W] [--height H] [--config cfg.json]
//!              [--font font.ttf] [--out card.png] [--dump]

use card_render::canvas::Canvas;
use card_render::config::RenderConfig;
use card_render::layout::{count_nodes, Available};
use card_render::renderer::{painter, Drawable};
use card_render::runtime::CardSession;
use card_render::template::Template;
use card_render::text::FontMetrics;
use card_render::Color;
use std::time::{Duration, Instant};
use url::Url;

const IMAGE_WAIT: Duration = Duration::from_secs(10);

struct Options {
    payload: String,
    width: f32,
    height: Option<f32>,
    config: Option<String>,
    font: Option<String>,
    out: Option<String>,
    dump: bool,
}

fn usage() -> String {
    "usage: card-preview <payload.json> [--width W] [--height H] [--config cfg.json] \
     [--font font.ttf] [--out card.png] [--dump]"
        .to_string()
}

fn parse_args() -> Result<Options, String> {
    let mut args = std::env::args().skip(1);
    let mut options = Options {
        payload: String::new(),
        width: 375.0,
        height: None,
        config: None,
        font: None,
        out: None,
        dump: false,
    };

    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or_else(|| format!("{} requires a value", name));
        match arg.as_str() {
            "--width" => options.width = parse_number(&value("--width")?)?,
            "--height" => options.height = Some(parse_number(&value("--height")?)?),
            "--config" => options.config = Some(value("--config")?),
            "--font" => options.font = Some(value("--font")?),
            "--out" => options.out = Some(value("--out")?),
            "--dump" => options.dump = true,
            "-h" | "--help" => return Err(usage()),
            other if other.starts_with("--") => return Err(format!("unknown option {}\n{}", other, usage())),
            other => options.payload = other.to_string(),
        }
    }

    if options.payload.is_empty() {
        return Err(usage());
    }
    if options.out.is_none() && !options.dump {
        options.out = Some("card.png".to_string());
    }
    Ok(options)
}

fn parse_number(raw: &str) -> Result<f32, String> {
    raw.parse::<f32>().map_err(|e| format!("invalid number {:?}: {}", raw, e))
}

/// 仍在加载中的图片数量
fn pending_images(drawable: &Drawable) -> usize {
    let own = match drawable {
        Drawable::Image(image) => image
            .handle
            .as_ref()
            .map_or(0, |handle| usize::from(!handle.state().is_settled())),
        _ => 0,
    };
    own + drawable.children().iter().map(pending_images).sum::<usize>()
}

fn main() -> Result<(), String> {
    env_logger::init();
    let options = parse_args()?;

    let payload = std::fs::read_to_string(&options.payload)
        .map_err(|e| format!("failed to read {}: {}", options.payload, e))?;
    let template = Template::from_json_str(&payload).map_err(|e| e.to_string())?;
    let config = match &options.config {
        Some(path) => RenderConfig::load(path).map_err(|e| e.to_string())?,
        None => RenderConfig::default(),
    };

    let font_data = match &options.font {
        Some(path) => Some(std::fs::read(path).map_err(|e| format!("failed to read font {}: {}", path, e))?),
        None => None,
    };

    let mut session = CardSession::new(template, config);
    if let Some(data) = &font_data {
        session = session.with_measurer(Box::new(FontMetrics::from_bytes(data)?));
    }
    session.set_interaction_handler(Box::new(|id: &str, url: Option<&Url>| {
        println!("interact {} {}", id, url.map_or("-", Url::as_str));
    }));

    let available = Available::new(options.width, options.height);
    session.render(available).map_err(|e| e.to_string())?;

    // 等图片加载完成后再渲染一次
    let started = Instant::now();
    while let Some(card) = session.rendered() {
        if pending_images(&card.tree) == 0 || started.elapsed() > IMAGE_WAIT {
            break;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    let card = session.render(available).map_err(|e| e.to_string())?;
    println!(
        "laid out {} nodes in {}x{}",
        count_nodes(&card.layout),
        card.layout.frame.width,
        card.layout.frame.height
    );

    if options.dump {
        let json = serde_json::to_string_pretty(card).map_err(|e| e.to_string())?;
        println!("{}", json);
    }

    if let Some(out) = &options.out {
        let width = options.width.ceil().max(1.0) as u32;
        let height = options
            .height
            .unwrap_or(card.layout.frame.bottom())
            .ceil()
            .max(1.0) as u32;
        let mut canvas = Canvas::new(width, height);
        canvas.clear(Color::WHITE);

        let font = match &font_data {
            Some(data) => Some(FontMetrics::from_bytes(data)?),
            None => None,
        };
        painter::paint(card, &mut canvas, font.as_ref());
        canvas.save_png(out).map_err(|e| e.to_string())?;
        println!("rendered to {}", out);
    }

    Ok(())
}
