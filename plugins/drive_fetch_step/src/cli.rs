use crate::inputs::StepInputs;
use download::DEFAULT_API_URL;
use step_config::cli::CommonArgs;
use url::Url;

/// Every input can be given as a flag or, as the runner does, through an
/// `INPUT_*` environment variable.
#[derive(clap::Parser, Debug)]
#[clap(
    name = clap::crate_name!(),
    version = clap::crate_version!(),
    about = clap::crate_description!(),
)]
pub struct DriveFetchCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Bearer token granting read access to the file
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Id of the file to download
    #[arg(long, env = "INPUT_FILE-ID")]
    file_id: Option<String>,

    /// Sharable link to the file, i.e. https://drive.google.com/file/d/<ID>/view
    ///
    /// Only used when no file id is given.
    #[arg(long, env = "INPUT_FILE-URL")]
    file_url: Option<String>,

    /// Where to save the file
    #[arg(long, env = "INPUT_PATH")]
    path: Option<String>,

    /// Base url of the Google Drive API
    #[arg(long, env = "DRIVE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,
}

impl DriveFetchCli {
    pub fn inputs(&self) -> StepInputs {
        StepInputs::from_raw(
            self.token.as_deref(),
            self.file_id.as_deref(),
            self.file_url.as_deref(),
            self.path.as_deref(),
        )
    }
}
