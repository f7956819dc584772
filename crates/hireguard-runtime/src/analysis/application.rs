//! Application volume and submission timing

use hireguard_core::{Application, ApplicationPattern, ApplicationRiskAnalysis};

const RAPID_FIRE_GAP_MS: i64 = 60_000;
const RAPID_FIRE_MAX_PAIRS: usize = 5;
const MIN_COVER_LETTER_CHARS: usize = 50;

fn classify(volume: u32) -> ApplicationPattern {
    match volume {
        0 => ApplicationPattern::None,
        v if v > 50 => ApplicationPattern::MassApplication,
        v if v > 20 => ApplicationPattern::HighVolume,
        v if v > 10 => ApplicationPattern::Active,
        _ => ApplicationPattern::Normal,
    }
}

/// Analyze applications in the order the store returned them.
pub fn analyze_applications(applications: &[Application]) -> ApplicationRiskAnalysis {
    if applications.is_empty() {
        return ApplicationRiskAnalysis {
            application_volume: 0,
            application_pattern: ApplicationPattern::None,
            response_quality: 0.0,
            time_patterns: Vec::new(),
        };
    }

    let application_volume = applications.len() as u32;

    let rapid_pairs = applications
        .windows(2)
        .filter(|pair| {
            let gap = pair[1].applied_at - pair[0].applied_at;
            gap.num_milliseconds().abs() < RAPID_FIRE_GAP_MS
        })
        .count();

    let mut time_patterns = Vec::new();
    if rapid_pairs > RAPID_FIRE_MAX_PAIRS {
        time_patterns.push("Rapid-fire applications detected".to_string());
    }

    let quality_letters = applications
        .iter()
        .filter(|a| {
            a.cover_letter
                .as_deref()
                .is_some_and(|letter| letter.chars().count() > MIN_COVER_LETTER_CHARS)
        })
        .count();
    let response_quality = quality_letters as f64 / applications.len() as f64 * 100.0;

    ApplicationRiskAnalysis {
        application_volume,
        application_pattern: classify(application_volume),
        response_quality,
        time_patterns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn application(i: usize, at: DateTime<Utc>, letter: Option<&str>) -> Application {
        Application {
            id: format!("app-{}", i),
            candidate_id: "u1".to_string(),
            cover_letter: letter.map(str::to_string),
            applied_at: at,
        }
    }

    fn spaced(count: usize, gap: Duration) -> Vec<Application> {
        let start = Utc::now();
        (0..count)
            .map(|i| application(i, start + gap * i as i32, None))
            .collect()
    }

    #[test]
    fn test_empty_applications() {
        let analysis = analyze_applications(&[]);
        assert_eq!(analysis.application_volume, 0);
        assert_eq!(analysis.application_pattern, ApplicationPattern::None);
        assert_eq!(analysis.response_quality, 0.0);
        assert!(analysis.time_patterns.is_empty());
    }

    #[test]
    fn test_pattern_classification() {
        let cases = [
            (5, ApplicationPattern::Normal),
            (10, ApplicationPattern::Normal),
            (11, ApplicationPattern::Active),
            (15, ApplicationPattern::Active),
            (21, ApplicationPattern::HighVolume),
            (25, ApplicationPattern::HighVolume),
            (51, ApplicationPattern::MassApplication),
            (60, ApplicationPattern::MassApplication),
        ];

        for (volume, expected) in cases {
            let analysis = analyze_applications(&spaced(volume, Duration::hours(1)));
            assert_eq!(analysis.application_volume, volume as u32);
            assert_eq!(analysis.application_pattern, expected, "volume {}", volume);
        }
    }

    #[test]
    fn test_rapid_fire_needs_more_than_five_pairs() {
        // 6 applications => 5 close pairs: not enough
        let analysis = analyze_applications(&spaced(6, Duration::seconds(10)));
        assert!(analysis.time_patterns.is_empty());

        // 7 applications => 6 close pairs
        let analysis = analyze_applications(&spaced(7, Duration::seconds(10)));
        assert_eq!(
            analysis.time_patterns,
            vec!["Rapid-fire applications detected".to_string()]
        );
    }

    #[test]
    fn test_rapid_fire_ignores_slow_pairs() {
        let analysis = analyze_applications(&spaced(20, Duration::seconds(60)));
        assert!(analysis.time_patterns.is_empty());
    }

    #[test]
    fn test_rapid_fire_uses_caller_order() {
        // descending order still counts close pairs
        let mut apps = spaced(8, Duration::seconds(5));
        apps.reverse();
        let analysis = analyze_applications(&apps);
        assert_eq!(analysis.time_patterns.len(), 1);
    }

    #[test]
    fn test_response_quality() {
        let now = Utc::now();
        let long_letter = "I have spent the last five years building hiring platforms in Rust.";
        let apps = vec![
            application(0, now, Some(long_letter)),
            application(1, now + Duration::hours(1), Some("Hire me")),
            application(2, now + Duration::hours(2), None),
            application(3, now + Duration::hours(3), Some(long_letter)),
        ];

        let analysis = analyze_applications(&apps);
        assert_eq!(analysis.response_quality, 50.0);
    }
}
