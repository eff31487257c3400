use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use namedrill_icons::{
    compositor, exporter,
    feature_graphic::{FeatureGraphic, FEATURE_GRAPHIC_FILE},
    font::system_font_paths,
    parse_color,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[clap(
    name = "namedrill-icons",
    about = "Draw the NameDrill icon and export it for every platform and store listing"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Draw the full icon and the adaptive foreground/background layers.
    Compose {
        /// Directory the three 1024x1024 layers are written to.
        #[clap(short, long, value_name = "DIR", default_value = "assets/icon")]
        output: PathBuf,
    },

    /// Resize a source icon into every launcher, adaptive and store size.
    Export {
        /// Path to the source icon (square PNG with transparency).
        #[clap(value_name = "INPUT", default_value = "assets/icon/app_icon.png")]
        input: PathBuf,

        #[clap(flatten)]
        export: ExportArgs,
    },

    /// Compose the 1024x500 store feature graphic.
    FeatureGraphic {
        /// Path to the source icon (square PNG with transparency).
        #[clap(value_name = "INPUT", default_value = "assets/icon/app_icon.png")]
        input: PathBuf,

        /// App project directory; the banner goes to store-assets/.
        #[clap(short, long, value_name = "DIR", default_value = "app")]
        app_dir: PathBuf,

        #[clap(flatten)]
        banner: BannerArgs,
    },

    /// Compose the icon, then export it and build the feature graphic from it.
    All {
        /// Directory the composed layers are written to.
        #[clap(short, long, value_name = "DIR", default_value = "assets/icon")]
        output: PathBuf,

        #[clap(flatten)]
        export: ExportArgs,

        #[clap(flatten)]
        banner: BannerArgs,
    },
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// App project directory the platform folders live in.
    #[clap(short, long, value_name = "DIR", default_value = "app")]
    app_dir: PathBuf,

    /// Adaptive icon background color (CSS color format).
    #[clap(long, default_value = "#6366f1")]
    background_color: String,
}

#[derive(Debug, Args)]
struct BannerArgs {
    #[clap(long, default_value = "NameDrill")]
    title: String,

    #[clap(long, default_value = "Remember every name & face")]
    subtitle: String,

    /// Gradient color at the top-left corner (CSS color format).
    #[clap(long, default_value = "#8a52b0")]
    gradient_start: String,

    /// Gradient color towards the bottom-right corner (CSS color format).
    #[clap(long, default_value = "#1abc9c")]
    gradient_end: String,

    /// Font file to try before the system fonts; may be repeated.
    #[clap(long = "font", value_name = "PATH")]
    fonts: Vec<PathBuf>,
}

impl BannerArgs {
    fn feature_graphic(&self) -> Result<FeatureGraphic> {
        let mut font_paths = self.fonts.clone();
        font_paths.extend(system_font_paths());

        Ok(FeatureGraphic {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            gradient_start: parse_color(&self.gradient_start)?,
            gradient_end: parse_color(&self.gradient_end)?,
            font_paths,
        })
    }
}

fn banner_path(app_dir: &Path) -> PathBuf {
    app_dir.join(exporter::STORE_ASSETS).join(FEATURE_GRAPHIC_FILE)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Compose { output } => {
            println!("Composing icon layers...");
            compositor::write_icon_set(&output)?;
        }
        Command::Export { input, export } => {
            let background = parse_color(&export.background_color)?;
            exporter::export_all(&input, &export.app_dir, background)?;
        }
        Command::FeatureGraphic {
            input,
            app_dir,
            banner,
        } => {
            banner
                .feature_graphic()?
                .generate(&input, &banner_path(&app_dir))?;
        }
        Command::All {
            output,
            export,
            banner,
        } => {
            // Validate every color before anything is written
            let background = parse_color(&export.background_color)?;
            let feature_graphic = banner.feature_graphic()?;

            println!("Composing icon layers...");
            compositor::write_icon_set(&output)?;

            let icon = output.join(compositor::ICON_FILE);
            exporter::export_all(&icon, &export.app_dir, background)?;
            feature_graphic.generate(&icon, &banner_path(&export.app_dir))?;
        }
    }

    println!("Done!");
    Ok(())
}
