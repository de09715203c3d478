use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use phasenoise::config::{PhaseNoiseConfig, PlotStyle};
use phasenoise::output::{CsvFormatter, Formatter};
use phasenoise::simulation::{PhaseNoiseEstimator, PhaseNoiseResult};

#[derive(Parser, Debug)]
#[command(name = "phasenoise_gui")]
#[command(about = "Phase noise study - GUI", long_about = None)]
struct Args {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    trials: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(short, long, default_value_t = 4)]
    workers: usize,

    /// Also save the plotted table as CSV
    #[arg(long)]
    save: Option<PathBuf>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct Panel {
    id: &'static str,
    title: &'static str,
    y_range: [f64; 2],
}

static PANELS: [Panel; 4] = [
    Panel {
        id: "mean_in_phase",
        title: "Magnitude (μ)",
        y_range: [0.99, 1.01],
    },
    Panel {
        id: "std_in_phase",
        title: "Magnitude (σ)",
        y_range: [0.09, 0.11],
    },
    Panel {
        id: "mean_angle",
        title: "Phase (μ)",
        y_range: [0.0, 90.0],
    },
    Panel {
        id: "std_angle",
        title: "Phase (σ)",
        y_range: [0.0, 6.0],
    },
];

struct PhaseNoiseApp {
    result: PhaseNoiseResult,
    style: PlotStyle,
}

impl PhaseNoiseApp {
    fn points(&self, values: &[f64]) -> PlotPoints {
        self.result
            .phase_degrees
            .iter()
            .zip(values.iter())
            .map(|(&x, &y)| [x, y])
            .collect()
    }

    fn color(&self, index: usize) -> egui::Color32 {
        let [r, g, b] = self.style.color(index);
        egui::Color32::from_rgb(r, g, b)
    }

    fn draw_panel(&self, ui: &mut egui::Ui, index: usize, plot_height: f32) {
        let panel = &PANELS[index];
        let series = &self.result.series;
        let values = match index {
            0 => &series.mean_in_phase,
            1 => &series.std_in_phase,
            2 => &series.mean_angle,
            _ => &series.std_angle,
        };
        let x_min = self.result.phase_degrees.first().copied().unwrap_or(0.0);
        let x_max = self.result.phase_degrees.last().copied().unwrap_or(90.0);

        ui.label(
            egui::RichText::new(panel.title)
                .color(egui::Color32::LIGHT_GRAY)
                .small(),
        );
        let mut plot = Plot::new(panel.id)
            .height(plot_height)
            .include_x(x_min)
            .include_x(x_max)
            .include_y(panel.y_range[0])
            .include_y(panel.y_range[1])
            .y_axis_min_width(60.0);
        if index >= 2 {
            plot = plot.x_axis_label("Phase [°]");
        }
        if index == 3 {
            plot = plot.legend(Legend::default());
        }

        let measured = self.points(values);
        let predicted = (index == 3).then(|| self.points(&self.result.predicted_std_angle));
        plot.show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(panel.title, measured)
                    .color(self.color(0))
                    .width(self.style.line_width),
            );
            if let Some(predicted) = predicted {
                plot_ui.line(
                    Line::new("First order", predicted)
                        .color(self.color(1))
                        .width(self.style.line_width)
                        .style(egui_plot::LineStyle::Dashed { length: 4.0 }),
                );
            }
        });
    }
}

impl eframe::App for PhaseNoiseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(format!(
                "I={}  σ={}  trials={}  seed={}",
                self.result.in_phase_amplitude,
                self.result.noise_std,
                self.result.trials,
                self.result.seed
            ));
            let plot_height = (ui.available_height() / 2.0 - 40.0).max(120.0);
            for row in 0..2 {
                ui.columns(2, |cols| {
                    for (col, ui) in cols.iter_mut().enumerate() {
                        self.draw_panel(ui, row * 2 + col, plot_height);
                    }
                });
            }
        });
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &args.config {
        Some(path) => PhaseNoiseConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => PhaseNoiseConfig::default(),
    };
    if let Some(trials) = args.trials {
        config.noise.trials = trials;
    }
    if args.seed.is_some() {
        config.noise.seed = args.seed;
    }
    if args.save.is_some() {
        config.plot.save_path = args.save.clone();
    }

    let result = PhaseNoiseEstimator::new(&config)?.estimate_parallel(args.workers)?;

    if let Some(path) = &config.plot.save_path {
        fs::write(path, CsvFormatter.format(&result)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Saved table to {}", path.display());
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 500.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Phase Deviation"),
        ..Default::default()
    };

    let app = PhaseNoiseApp {
        result,
        style: config.plot,
    };
    eframe::run_native(
        "Phase Deviation",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    Ok(())
}
