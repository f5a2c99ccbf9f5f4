use rstest::{fixture, rstest};
use volparams::params::{DATA, MOTION, VOLSPIKE};
use volparams::{
    DataParams, ParamGroup, ParamMap, ParamValue, ParamsError, SpikeParams, VolParams,
    VolParamsConfig,
};

fn overrides<const N: usize>(entries: [(&str, ParamValue); N]) -> ParamMap {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[fixture]
fn params() -> VolParams {
    let _ = env_logger::builder().is_test(true).try_init();
    VolParams::default()
}

#[rstest]
#[case(DATA, "fnames", ParamValue::None)]
#[case(DATA, "fr", ParamValue::None)]
#[case(DATA, "index", ParamValue::None)]
#[case(DATA, "ROIs", ParamValue::None)]
#[case(DATA, "weights", ParamValue::None)]
#[case(VOLSPIKE, "context_size", ParamValue::Int(35))]
#[case(VOLSPIKE, "censor_size", ParamValue::Int(12))]
#[case(VOLSPIKE, "flip_signal", ParamValue::Bool(true))]
#[case(VOLSPIKE, "hp_freq_pb", ParamValue::Float(1.0 / 3.0))]
#[case(VOLSPIKE, "nPC_bg", ParamValue::Int(8))]
#[case(VOLSPIKE, "ridge_bg", ParamValue::Float(0.01))]
#[case(VOLSPIKE, "hp_freq", ParamValue::Float(1.0))]
#[case(VOLSPIKE, "threshold_method", ParamValue::from("simple"))]
#[case(VOLSPIKE, "min_spikes", ParamValue::Int(10))]
#[case(VOLSPIKE, "threshold", ParamValue::Float(4.0))]
#[case(VOLSPIKE, "sigmas", ParamValue::Array(vec![1.0, 1.5, 2.0]))]
#[case(VOLSPIKE, "n_iter", ParamValue::Int(2))]
#[case(VOLSPIKE, "weight_update", ParamValue::from("ridge"))]
#[case(VOLSPIKE, "do_plot", ParamValue::Bool(true))]
#[case(VOLSPIKE, "do_cross_val", ParamValue::Bool(false))]
#[case(VOLSPIKE, "sub_freq", ParamValue::Float(75.0))]
#[case(VOLSPIKE, "method", ParamValue::from("spikepursuit"))]
#[case(VOLSPIKE, "superfactor", ParamValue::Int(10))]
#[case(MOTION, "border_nan", ParamValue::from("copy"))]
#[case(MOTION, "gSig_filt", ParamValue::None)]
#[case(MOTION, "max_deviation_rigid", ParamValue::Int(3))]
#[case(MOTION, "max_shifts", ParamValue::Seq(vec![ParamValue::Int(6), ParamValue::Int(6)]))]
#[case(MOTION, "min_mov", ParamValue::None)]
#[case(MOTION, "niter_rig", ParamValue::Int(1))]
#[case(MOTION, "nonneg_movie", ParamValue::Bool(true))]
#[case(MOTION, "num_frames_split", ParamValue::Int(80))]
#[case(MOTION, "num_splits_to_process_els", ParamValue::None)]
#[case(MOTION, "num_splits_to_process_rig", ParamValue::None)]
#[case(MOTION, "overlaps", ParamValue::Seq(vec![ParamValue::Int(32), ParamValue::Int(32)]))]
#[case(MOTION, "pw_rigid", ParamValue::Bool(false))]
#[case(MOTION, "shifts_opencv", ParamValue::Bool(true))]
#[case(MOTION, "splits_els", ParamValue::Int(14))]
#[case(MOTION, "splits_rig", ParamValue::Int(14))]
#[case(MOTION, "strides", ParamValue::Seq(vec![ParamValue::Int(96), ParamValue::Int(96)]))]
#[case(MOTION, "upsample_factor_grid", ParamValue::Int(4))]
#[case(MOTION, "use_cuda", ParamValue::Bool(false))]
fn defaults_are_returned_before_updates(
    params: VolParams,
    #[case] group: &str,
    #[case] key: &str,
    #[case] expected: ParamValue,
) {
    assert_eq!(params.get(group, key).unwrap(), &expected, "{}.{}", group, key);
}

#[rstest]
fn every_default_key_is_stored(params: VolParams) {
    let config = VolParamsConfig::default();
    let expected = [
        (DATA, ParamGroup::from(config.data)),
        (VOLSPIKE, ParamGroup::from(config.volspike)),
        (MOTION, ParamGroup::from(config.motion)),
    ];

    let mut total = 0;
    for (group, entries) in &expected {
        assert_eq!(params.get_group(group).unwrap().len(), entries.len());
        for (key, value) in entries {
            assert_eq!(params.get(group, key).unwrap(), value, "{}.{}", group, key);
            total += 1;
        }
    }
    assert_eq!(total, 41);
}

#[rstest]
fn group_names_are_fixed(params: VolParams) {
    let names: Vec<&str> = params.group_names().collect();
    assert_eq!(names, vec![DATA, MOTION, VOLSPIKE]);
}

#[rstest]
fn set_overwrites_existing_keys_idempotently(mut params: VolParams) {
    let updates = overrides([
        ("max_shifts", ParamValue::from((5, 5))),
        ("pw_rigid", ParamValue::Bool(true)),
    ]);

    params.set(MOTION, &updates, false, false).unwrap();
    let once = params.clone();
    params.set(MOTION, &updates, false, false).unwrap();

    assert_eq!(params, once);
    assert_eq!(params.get(MOTION, "max_shifts").unwrap(), &ParamValue::from((5, 5)));
    assert_eq!(params.get(MOTION, "pw_rigid").unwrap().as_bool(), Some(true));
}

#[rstest]
#[case(false)]
#[case(true)]
fn set_skips_unknown_keys(mut params: VolParams, #[case] verbose: bool) {
    let before = params.get_group(VOLSPIKE).unwrap().clone();

    params
        .set(VOLSPIKE, &overrides([("no_such_key", ParamValue::Int(1))]), false, verbose)
        .unwrap();

    assert_eq!(params.get_group(VOLSPIKE).unwrap(), &before);
}

#[rstest]
fn set_creates_keys_when_asked(mut params: VolParams) {
    params
        .set(DATA, &overrides([("pixel_size", ParamValue::Float(0.5))]), true, false)
        .unwrap();

    assert_eq!(params.get(DATA, "pixel_size").unwrap().as_f64(), Some(0.5));
    // Created keys stay in their own group
    assert!(matches!(
        params.get(MOTION, "pixel_size"),
        Err(ParamsError::UnknownKey { .. })
    ));
}

#[rstest]
fn unknown_group_is_an_error(mut params: VolParams) {
    let err = params
        .set("detection", &overrides([("threshold", ParamValue::Int(3))]), false, false)
        .unwrap_err();
    assert_eq!(err, ParamsError::UnknownGroup("detection".to_string()));

    assert!(matches!(params.get("nope", "fr"), Err(ParamsError::UnknownGroup(_))));
    assert!(matches!(params.get_group("nope"), Err(ParamsError::UnknownGroup(_))));
}

#[rstest]
fn unknown_key_is_an_error(params: VolParams) {
    let err = params.get(VOLSPIKE, "no_such_key").unwrap_err();
    assert_eq!(
        err,
        ParamsError::UnknownKey {
            group: VOLSPIKE.to_string(),
            key: "no_such_key".to_string(),
        }
    );
    assert_eq!(err.to_string(), "No key no_such_key in group volspike");
}

#[rstest]
fn change_params_updates_only_the_matching_group(mut params: VolParams) {
    let before = params.clone();

    params.change_params(&overrides([("threshold", ParamValue::Float(3.5))]), false);

    assert_eq!(params.get(VOLSPIKE, "threshold").unwrap().as_f64(), Some(3.5));
    assert_eq!(params.get_group(DATA).unwrap(), before.get_group(DATA).unwrap());
    assert_eq!(params.get_group(MOTION).unwrap(), before.get_group(MOTION).unwrap());
}

#[rstest]
fn change_params_reports_unmatched_keys_without_changes(mut params: VolParams) {
    let before = params.clone();
    let updates = overrides([("not_a_param", ParamValue::Bool(true))]);

    assert_eq!(params.unmatched_keys(&updates), vec!["not_a_param"]);
    params.change_params(&updates, true);

    assert_eq!(params, before);
}

#[rstest]
fn change_params_chains(mut params: VolParams) {
    params
        .change_params(&overrides([("fr", ParamValue::Int(400))]), false)
        .change_params(&overrides([("method", ParamValue::from("atm"))]), false);

    assert_eq!(params.get(DATA, "fr").unwrap().as_f64(), Some(400.0));
    assert_eq!(params.get(VOLSPIKE, "method").unwrap().as_str(), Some("atm"));
}

#[test]
fn construction_applies_valid_and_drops_invalid_overrides() {
    let mixed = overrides([
        ("fr", ParamValue::Int(400)),
        ("strides", ParamValue::from((48, 48))),
        ("bogus", ParamValue::from("x")),
        ("also_bogus", ParamValue::None),
    ]);

    let params = VolParams::with_overrides(&mixed);

    assert_eq!(params.get(DATA, "fr").unwrap().as_i64(), Some(400));
    assert_eq!(params.get(MOTION, "strides").unwrap(), &ParamValue::from((48, 48)));
    assert_eq!(params.unmatched_keys(&mixed), vec!["also_bogus", "bogus"]);
    for group in [DATA, VOLSPIKE, MOTION] {
        assert!(matches!(params.get(group, "bogus"), Err(ParamsError::UnknownKey { .. })));
    }
}

#[test]
fn construction_uses_caller_defaults() {
    let config = VolParamsConfig {
        data: DataParams {
            fnames: Some(vec!["movie.mmap".to_string()]),
            fr: Some(400.0),
            ..Default::default()
        },
        volspike: SpikeParams {
            min_spikes: 20,
            ..Default::default()
        },
        ..Default::default()
    };

    let params = VolParams::new(config, &overrides([("min_spikes", ParamValue::Int(5))]));

    assert_eq!(params.get(DATA, "fnames").unwrap(), &ParamValue::from(vec!["movie.mmap"]));
    assert_eq!(params.get(DATA, "fr").unwrap().as_f64(), Some(400.0));
    assert_eq!(params.get(VOLSPIKE, "min_spikes").unwrap().as_i64(), Some(5));
}

#[test]
fn instances_do_not_share_defaults() {
    let mut first = VolParams::default();
    let second = VolParams::default();

    first.change_params(&overrides([("sigmas", ParamValue::from(vec![2.0]))]), false);

    assert_eq!(
        second.get(VOLSPIKE, "sigmas").unwrap(),
        &ParamValue::Array(vec![1.0, 1.5, 2.0])
    );
}
