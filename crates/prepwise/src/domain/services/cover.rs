//! Interview cover images

use rand::seq::SliceRandom;

/// Cover images bundled with the web client
pub const INTERVIEW_COVERS: [&str; 8] = [
    "/covers/adobe.png",
    "/covers/amazon.png",
    "/covers/facebook.png",
    "/covers/hostinger.png",
    "/covers/pinterest.png",
    "/covers/quora.png",
    "/covers/reddit.png",
    "/covers/skype.png",
];

/// Pick a cover image at random
pub fn random_interview_cover() -> &'static str {
    INTERVIEW_COVERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(INTERVIEW_COVERS[0])
}
