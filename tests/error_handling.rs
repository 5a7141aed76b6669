use entroscope::{
    analyze_tokens, build_reference, build_tokenizer, AnalysisConfig, AnalysisError, AnalysisMode,
    CompressionAlgorithm, ReferenceError, TokenizeConfig, TokenizeError, TokenizerKind,
};

fn tokens() -> Vec<&'static str> {
    vec!["a", "b", "c", "d", "e", "f"]
}

#[test]
fn zero_window_size_is_invalid() {
    let cfg = AnalysisConfig::new().with_window_size(0);
    assert!(matches!(
        analyze_tokens(&tokens(), &cfg, None),
        Err(AnalysisError::InvalidWindowSize { window_size: 0 })
    ));
}

#[test]
fn zero_step_is_invalid() {
    let cfg = AnalysisConfig::new().with_step(0);
    assert!(matches!(
        analyze_tokens(&tokens(), &cfg, None),
        Err(AnalysisError::InvalidStep { step: 0 })
    ));
}

#[test]
fn degenerate_log_bases_are_invalid() {
    for log_base in [0.0, -2.0, 1.0] {
        let cfg = AnalysisConfig::new().with_log_base(log_base);
        assert!(
            matches!(
                analyze_tokens(&tokens(), &cfg, None),
                Err(AnalysisError::InvalidLogBase { .. })
            ),
            "log_base {log_base} must be rejected"
        );
    }
}

#[test]
fn diff_without_reference_is_a_missing_dependency() {
    let cfg = AnalysisConfig::new().with_mode(AnalysisMode::Diff);
    assert!(matches!(
        analyze_tokens(&tokens(), &cfg, None),
        Err(AnalysisError::MissingReference)
    ));
}

#[test]
fn unknown_mode_name_is_invalid() {
    assert!(matches!(
        "spectral".parse::<AnalysisMode>(),
        Err(AnalysisError::UnknownMode(ref name)) if name == "spectral"
    ));
}

#[test]
fn unknown_compression_name_is_invalid() {
    assert!(matches!(
        "snappy".parse::<CompressionAlgorithm>(),
        Err(AnalysisError::UnknownCompression(ref name)) if name == "snappy"
    ));
}

#[test]
fn negative_smoothing_is_invalid() {
    assert!(matches!(
        build_reference(&tokens(), -0.5),
        Err(ReferenceError::InvalidSmoothing { .. })
    ));
}

#[test]
fn external_tokenizer_without_impl_fails_at_construction() {
    let cfg = TokenizeConfig::new().with_method(TokenizerKind::External);
    assert!(matches!(
        build_tokenizer(&cfg, None),
        Err(TokenizeError::ExternalUnavailable)
    ));
}

#[test]
fn errors_carry_readable_messages() {
    let err = analyze_tokens(&tokens(), &AnalysisConfig::new().with_window_size(0), None)
        .err()
        .unwrap();
    assert!(err.to_string().contains("window_size"));

    let err = build_reference(&tokens(), -1.0).err().unwrap();
    assert!(err.to_string().contains("smoothing_k"));
}
