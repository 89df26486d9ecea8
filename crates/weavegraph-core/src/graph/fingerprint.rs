use crate::graph::{
    game::FeatureVector,
    ids::{Fingerprint, PlayerId},
};

/// Derive the transposition key of `state` as seen by `player`.
/// Pure function of its inputs; the state is only borrowed.
pub fn fingerprint<S, F>(features: &F, state: &S, player: PlayerId) -> Fingerprint
where
    F: FeatureVector<S> + ?Sized,
{
    Fingerprint::from_features(&features.features(state, player))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    impl FeatureVector<Vec<f64>> for Identity {
        fn features(&self, state: &Vec<f64>, player: PlayerId) -> Vec<f64> {
            let mut out = state.clone();
            out.push(player as f64);
            out
        }
    }

    #[test]
    fn equal_features_give_equal_fingerprints() {
        let a = fingerprint(&Identity, &vec![1.0, 2.5], 0);
        let b = fingerprint(&Identity, &vec![1.0, 2.5], 0);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn perspective_player_is_part_of_identity() {
        let a = fingerprint(&Identity, &vec![1.0], 0);
        let b = fingerprint(&Identity, &vec![1.0], 1);
        assert_ne!(a, b);
    }

    #[test]
    fn signed_zero_and_nan_are_normalised() {
        assert_eq!(
            Fingerprint::from_features(&[0.0, f64::NAN]),
            Fingerprint::from_features(&[-0.0, -f64::NAN])
        );
    }

    #[test]
    fn display_lists_features() {
        let key = Fingerprint::from_features(&[1.0, 0.5, -2.0]);
        assert_eq!(key.to_string(), "[1.0, 0.5, -2.0]");
    }
}
