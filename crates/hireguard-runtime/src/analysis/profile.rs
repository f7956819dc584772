//! Profile completeness and consistency

use crate::config::RiskEngineConfig;
use hireguard_core::{Profile, ProfileRiskAnalysis, VerificationStatus};

const MIN_BIO_CHARS: usize = 10;

fn is_filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Score profile completeness and flag inconsistencies.
///
/// A missing profile is a degenerate result, not an error.
pub fn analyze_profile(profile: Option<&Profile>, config: &RiskEngineConfig) -> ProfileRiskAnalysis {
    let profile = match profile {
        Some(profile) => profile,
        None => {
            return ProfileRiskAnalysis {
                profile_completeness: 0.0,
                inconsistencies: vec!["Profile not found".to_string()],
                suspicious_patterns: Vec::new(),
                verification_status: VerificationStatus::default(),
            }
        }
    };

    let required = [
        &profile.first_name,
        &profile.last_name,
        &profile.email,
        &profile.bio,
    ];
    let filled = required.iter().filter(|field| is_filled(field)).count();
    let profile_completeness = filled as f64 / required.len() as f64 * 100.0;

    let mut inconsistencies = Vec::new();
    if let (Some(first), Some(last)) = (&profile.first_name, &profile.last_name) {
        if !first.is_empty() && first == last {
            inconsistencies.push("First name and last name are identical".to_string());
        }
    }

    let mut suspicious_patterns = Vec::new();
    if let Some(bio) = &profile.bio {
        if bio.chars().count() < MIN_BIO_CHARS {
            suspicious_patterns.push("Bio is unusually short".to_string());
        }
    }
    if let Some(email) = &profile.email {
        if config.blacklist.contains_email(email) {
            suspicious_patterns.push("Email address is blacklisted".to_string());
        }
        if config.rules.disposable_email(email) > 0 {
            suspicious_patterns.push("Disposable email provider".to_string());
        }
    }

    ProfileRiskAnalysis {
        profile_completeness,
        inconsistencies,
        suspicious_patterns,
        verification_status: VerificationStatus {
            email: profile.email_verified,
            phone: profile.phone_verified,
            linkedin: is_filled(&profile.linkedin_url),
            github: is_filled(&profile.github_url),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lists::Blacklist;
    use chrono::Utc;
    use hireguard_core::BlacklistEntry;

    fn complete_profile() -> Profile {
        let mut profile = Profile::new("u1", Utc::now());
        profile.first_name = Some("Jane".to_string());
        profile.last_name = Some("Doe".to_string());
        profile.email = Some("jane@example.com".to_string());
        profile.bio = Some("Backend engineer with ten years of Rust".to_string());
        profile
    }

    #[test]
    fn test_missing_profile() {
        let analysis = analyze_profile(None, &RiskEngineConfig::default());

        assert_eq!(analysis.profile_completeness, 0.0);
        assert_eq!(analysis.inconsistencies, vec!["Profile not found".to_string()]);
        assert!(analysis.suspicious_patterns.is_empty());
        assert_eq!(analysis.verification_status, VerificationStatus::default());
    }

    #[test]
    fn test_complete_profile() {
        let analysis = analyze_profile(Some(&complete_profile()), &RiskEngineConfig::default());

        assert_eq!(analysis.profile_completeness, 100.0);
        assert!(analysis.inconsistencies.is_empty());
        assert!(analysis.suspicious_patterns.is_empty());
    }

    #[test]
    fn test_partial_completeness() {
        let mut profile = complete_profile();
        profile.bio = None;
        profile.last_name = Some(String::new());

        let analysis = analyze_profile(Some(&profile), &RiskEngineConfig::default());
        assert_eq!(analysis.profile_completeness, 50.0);
    }

    #[test]
    fn test_identical_names_is_case_sensitive() {
        let mut profile = complete_profile();
        profile.first_name = Some("Alex".to_string());
        profile.last_name = Some("Alex".to_string());
        let analysis = analyze_profile(Some(&profile), &RiskEngineConfig::default());
        assert_eq!(analysis.inconsistencies.len(), 1);

        profile.last_name = Some("alex".to_string());
        let analysis = analyze_profile(Some(&profile), &RiskEngineConfig::default());
        assert!(analysis.inconsistencies.is_empty());
    }

    #[test]
    fn test_suspicious_patterns_accumulate() {
        let mut profile = complete_profile();
        profile.bio = Some("hi".to_string());
        profile.email = Some("bot@mailinator.com".to_string());

        let config = RiskEngineConfig::default().with_blacklist(Blacklist::from_entries(vec![
            BlacklistEntry::email("bot@mailinator.com"),
        ]));

        let analysis = analyze_profile(Some(&profile), &config);
        assert_eq!(
            analysis.suspicious_patterns,
            vec![
                "Bio is unusually short".to_string(),
                "Email address is blacklisted".to_string(),
                "Disposable email provider".to_string(),
            ]
        );
    }

    #[test]
    fn test_verification_pass_through() {
        let mut profile = complete_profile();
        profile.email_verified = true;
        profile.linkedin_url = Some("not even a url".to_string());

        let analysis = analyze_profile(Some(&profile), &RiskEngineConfig::default());
        assert_eq!(
            analysis.verification_status,
            VerificationStatus {
                email: true,
                phone: false,
                linkedin: true,
                github: false,
            }
        );
    }

    #[test]
    fn test_idempotent() {
        let profile = complete_profile();
        let config = RiskEngineConfig::default();
        assert_eq!(
            analyze_profile(Some(&profile), &config),
            analyze_profile(Some(&profile), &config)
        );
    }
}
