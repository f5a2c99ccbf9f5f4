// src/params/defaults.rs
// Typed default values for the three parameter groups. Each struct lowers into
// the key/value mapping that a VolParams store holds for its group.

use super::{ParamGroup, ParamValue};

/// Data source and metadata parameters (`data` group)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataParams {
    /// Movie file names; only a memory-mapped file for spike detection
    pub fnames: Option<Vec<String>>,
    /// Sample rate of the movie
    pub fr: Option<f64>,
    /// Cell numbers to process
    pub index: Option<Vec<i64>>,
    /// Regions of interest
    pub rois: ParamValue,
    /// Spatial weights from previous blocks, used as initialization
    pub weights: ParamValue,
}

/// Spike detection parameters (`volspike` group)
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeParams {
    /// Pixels surrounding the ROI used as context
    pub context_size: i64,
    /// Pixels surrounding the ROI censored from the background PCA
    pub censor_size: i64,
    /// Flip the signal before looking for spikes
    pub flip_signal: bool,
    /// High-pass frequency for removing photobleaching
    pub hp_freq_pb: f64,
    /// Principal components used for background subtraction
    pub n_pc_bg: i64,
    /// Ridge regularization strength for background removal
    pub ridge_bg: f64,
    /// High-pass cutoff applied to the trace
    pub hp_freq: f64,
    /// "simple" or "adaptive_threshold"
    pub threshold_method: String,
    /// Minimal number of spikes to detect
    pub min_spikes: i64,
    /// Spike threshold
    pub threshold: f64,
    /// Spatial smoothing radii on the high-pass filtered movie
    pub sigmas: Vec<f64>,
    /// Iterations alternating temporal and spatial filter estimation
    pub n_iter: i64,
    /// "ridge" or "NMF"
    pub weight_update: String,
    /// Plot in the last iteration
    pub do_plot: bool,
    /// Cross-validate the regression regularization
    pub do_cross_val: bool,
    /// Frequency for extracting subthreshold oscillation
    pub sub_freq: f64,
    /// "spikepursuit" or "atm" (adaptive template matching)
    pub method: String,
    /// Temporal super-resolution factor for spike times
    pub superfactor: i64,
}

/// Motion correction parameters (`motion` group)
#[derive(Debug, Clone, PartialEq)]
pub struct MotionParams {
    /// How NaN borders are handled ("copy", "min", ...)
    pub border_nan: String,
    /// High-pass spatial filter kernel for 1p data
    pub g_sig_filt: Option<(i64, i64)>,
    /// Maximum deviation between rigid and non-rigid shifts
    pub max_deviation_rigid: i64,
    /// Maximum shifts per dimension, in pixels
    pub max_shifts: (i64, i64),
    /// Minimum value of the movie
    pub min_mov: Option<f64>,
    /// Rigid motion correction iterations
    pub niter_rig: i64,
    /// Produce a non-negative movie
    pub nonneg_movie: bool,
    /// Split across time every this many frames
    pub num_frames_split: i64,
    /// Splits to process in pw-rigid registration (all when unset)
    pub num_splits_to_process_els: Option<i64>,
    /// Splits to process in rigid registration (all when unset)
    pub num_splits_to_process_rig: Option<i64>,
    /// Patch overlap in pw-rigid correction
    pub overlaps: (i64, i64),
    /// Perform pw-rigid motion correction
    pub pw_rigid: bool,
    /// Apply shifts with cubic interpolation instead of FFT
    pub shifts_opencv: bool,
    /// Splits across time for pw-rigid registration
    pub splits_els: i64,
    /// Splits across time for rigid registration
    pub splits_rig: i64,
    /// Patch start stride in pw-rigid registration
    pub strides: (i64, i64),
    /// Motion field upsampling factor during FFT shifts
    pub upsample_factor_grid: i64,
    /// Run on the GPU
    pub use_cuda: bool,
}

/// Defaults for every group of a VolParams store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolParamsConfig {
    /// Data group defaults
    pub data: DataParams,
    /// Spike detection group defaults
    pub volspike: SpikeParams,
    /// Motion correction group defaults
    pub motion: MotionParams,
}

impl Default for SpikeParams {
    fn default() -> Self {
        SpikeParams {
            context_size: 35,
            censor_size: 12,
            flip_signal: true,
            hp_freq_pb: 1.0 / 3.0,
            n_pc_bg: 8,
            ridge_bg: 0.01,
            hp_freq: 1.0,
            threshold_method: "simple".to_string(),
            min_spikes: 10,
            threshold: 4.0,
            sigmas: vec![1.0, 1.5, 2.0],
            n_iter: 2,
            weight_update: "ridge".to_string(),
            do_plot: true,
            do_cross_val: false,
            sub_freq: 75.0,
            method: "spikepursuit".to_string(),
            superfactor: 10,
        }
    }
}

impl Default for MotionParams {
    fn default() -> Self {
        MotionParams {
            border_nan: "copy".to_string(),
            g_sig_filt: None,
            max_deviation_rigid: 3,
            max_shifts: (6, 6),
            min_mov: None,
            niter_rig: 1,
            nonneg_movie: true,
            num_frames_split: 80,
            num_splits_to_process_els: None,
            num_splits_to_process_rig: None,
            overlaps: (32, 32),
            pw_rigid: false,
            shifts_opencv: true,
            splits_els: 14,
            splits_rig: 14,
            strides: (96, 96),
            upsample_factor_grid: 4,
            use_cuda: false,
        }
    }
}

// Key names follow the pipeline's parameter names, not the Rust field names
fn group<const N: usize>(entries: [(&str, ParamValue); N]) -> ParamGroup {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

impl From<DataParams> for ParamGroup {
    fn from(p: DataParams) -> Self {
        group([
            ("fnames", p.fnames.into()),
            ("fr", p.fr.into()),
            ("index", p.index.into()),
            ("ROIs", p.rois),
            ("weights", p.weights),
        ])
    }
}

impl From<SpikeParams> for ParamGroup {
    fn from(p: SpikeParams) -> Self {
        group([
            ("context_size", p.context_size.into()),
            ("censor_size", p.censor_size.into()),
            ("flip_signal", p.flip_signal.into()),
            ("hp_freq_pb", p.hp_freq_pb.into()),
            ("nPC_bg", p.n_pc_bg.into()),
            ("ridge_bg", p.ridge_bg.into()),
            ("hp_freq", p.hp_freq.into()),
            ("threshold_method", p.threshold_method.into()),
            ("min_spikes", p.min_spikes.into()),
            ("threshold", p.threshold.into()),
            ("sigmas", ParamValue::Array(p.sigmas)),
            ("n_iter", p.n_iter.into()),
            ("weight_update", p.weight_update.into()),
            ("do_plot", p.do_plot.into()),
            ("do_cross_val", p.do_cross_val.into()),
            ("sub_freq", p.sub_freq.into()),
            ("method", p.method.into()),
            ("superfactor", p.superfactor.into()),
        ])
    }
}

impl From<MotionParams> for ParamGroup {
    fn from(p: MotionParams) -> Self {
        group([
            ("border_nan", p.border_nan.into()),
            ("gSig_filt", p.g_sig_filt.into()),
            ("max_deviation_rigid", p.max_deviation_rigid.into()),
            ("max_shifts", p.max_shifts.into()),
            ("min_mov", p.min_mov.into()),
            ("niter_rig", p.niter_rig.into()),
            ("nonneg_movie", p.nonneg_movie.into()),
            ("num_frames_split", p.num_frames_split.into()),
            ("num_splits_to_process_els", p.num_splits_to_process_els.into()),
            ("num_splits_to_process_rig", p.num_splits_to_process_rig.into()),
            ("overlaps", p.overlaps.into()),
            ("pw_rigid", p.pw_rigid.into()),
            ("shifts_opencv", p.shifts_opencv.into()),
            ("splits_els", p.splits_els.into()),
            ("splits_rig", p.splits_rig.into()),
            ("strides", p.strides.into()),
            ("upsample_factor_grid", p.upsample_factor_grid.into()),
            ("use_cuda", p.use_cuda.into()),
        ])
    }
}
