//! Synthetic data for local development.
//!
//! Every seeded user gets two videos and one comment on each of them. Names,
//! videos and comments are drawn from fixed pools without replacement, so a
//! single run never produces duplicate emails, nicks or urls.

use crate::db::user_repo;
use crate::models::{NewUser, NewVideo, UserDetail};
use rand::Rng;
use sqlx::PgPool;
use thiserror::Error;

pub const VIDEOS_PER_USER: usize = 2;

pub const USAGE: &str = "\
Usage: seed [COUNT]

Seeds COUNT users, each with two videos and one comment per video.
COUNT must be between 1 and 12 (default: 12).";

/// Parallel pools: the first name at index i pairs with the last name at i.
pub const FIRST_NAMES: [&str; 12] = [
    "Shinji", "Rei", "Asuka", "Misato", "Gendo", "Ritsuko", "Kaworu", "Toji", "Kensuke",
    "Hikari", "Maya", "Ryoji",
];

pub const LAST_NAMES: [&str; 12] = [
    "Ikari", "Ayanami", "Langley", "Katsuragi", "Rokubungi", "Akagi", "Nagisa", "Suzuhara",
    "Aida", "Horaki", "Ibuki", "Kaji",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoInfo {
    pub url: &'static str,
    pub title: &'static str,
    pub description: Option<&'static str>,
}

const fn video(
    url: &'static str,
    title: &'static str,
    description: Option<&'static str>,
) -> VideoInfo {
    VideoInfo {
        url,
        title,
        description,
    }
}

pub const VIDEO_INFOS: [VideoInfo; 24] = [
    video("Lo2qQmj0_h4", "AC/DC - You Shook Me All Night Long", Some("Official video, 1986 reissue")),
    video("hTWKbfoikeg", "Nirvana - Smells Like Teen Spirit", Some("Grunge and alternative rock classic")),
    video("vabnZ9-ex7o", "Pearl Jam - Alive", Some("Live from Seattle")),
    video("TR3Vdo5etCQ", "Soundgarden - Black Hole Sun", Some("Alternative rock at its strangest")),
    video("9Ht5RZpzPqw", "Alice In Chains - Man In The Box", None),
    video("XFkzRNyygfk", "Radiohead - Creep", Some("Debut single, alternative rock")),
    video("1lyu1KKwC74", "The Verve - Bitter Sweet Symphony", Some("Britpop anthem")),
    video("6Ejga4kJUts", "The Cranberries - Zombie", Some("Official music video")),
    video("hejXc_FSYb8", "Stone Temple Pilots - Plush", None),
    video("eBG7P-K-r1Y", "Foo Fighters - Everlong", Some("Acoustic and electric versions")),
    video("j0lSpNtjPM8", "The Smashing Pumpkins - 1979", Some("Suburban nostalgia")),
    video("Sh6rW4bMoxw", "Weezer - Buddy Holly", Some("Directed by Spike Jonze")),
    video("zRIbf6JqkNc", "Metallica - Nothing Else Matters", Some("Black album ballad")),
    video("1w7OgIMMRc4", "Guns N' Roses - Sweet Child O' Mine", None),
    video("fJ9rUzIMcZQ", "Queen - Bohemian Rhapsody", Some("Remastered in HD")),
    video("btPJPFnesV4", "Survivor - Eye Of The Tiger", Some("Training montage staple")),
    video("SRvCvsRp5ho", "Bon Jovi - Wanted Dead Or Alive", None),
    video("lDK9QqIzhwk", "Bon Jovi - Livin' On A Prayer", Some("Arena rock singalong")),
    video("pAgnJDJN4VA", "AC/DC - Back In Black", Some("Official video")),
    video("v2AC41dglnM", "AC/DC - Thunderstruck", Some("Live at Donington")),
    video("3mbBbFH9fAg", "Red Hot Chili Peppers - Under The Bridge", Some("Alternative rock ballad")),
    video("YlUKcNNmywk", "Red Hot Chili Peppers - Californication", None),
    video("CdhqVtpR2ts", "Oasis - Wonderwall", Some("Britpop, 1995")),
    video("bx1Bh8ZvH84", "Oasis - Don't Look Back In Anger", Some("Official video")),
];

pub const VIDEO_COMMENTS: [&str; 24] = [
    "This never gets old",
    "Still listening in 2024",
    "Best riff ever written",
    "My dad introduced me to this",
    "The drums on this track are unreal",
    "Chills every single time",
    "Saw them live, incredible show",
    "The bridge is perfection",
    "Who else is here after the documentary?",
    "Pure nostalgia",
    "Underrated song honestly",
    "The vocals carry the whole thing",
    "Played this at my wedding",
    "Timeless classic",
    "That solo at the end though",
    "They don't make music like this anymore",
    "First song I learned on guitar",
    "The production holds up so well",
    "Came for the song, stayed for the comments",
    "Road trip essential",
    "Lyrics hit different now",
    "Goosebumps at the chorus",
    "Masterpiece from start to finish",
    "Turn it up!",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("too many arguments")]
    TooManyArguments,
    #[error("COUNT must be a number, got {0:?}")]
    NotANumber(String),
    #[error("COUNT must be between 1 and {max}, got {count}")]
    OutOfRange { count: i64, max: usize },
}

/// Parse the arguments after the program name into a user count.
pub fn parse_count(args: &[String], max: usize) -> Result<usize, UsageError> {
    match args {
        [] => Ok(max),
        [raw] => {
            let count: i64 = raw
                .trim()
                .parse()
                .map_err(|_| UsageError::NotANumber(raw.clone()))?;
            if count < 1 || count as u64 > max as u64 {
                return Err(UsageError::OutOfRange { count, max });
            }
            Ok(count as usize)
        }
        _ => Err(UsageError::TooManyArguments),
    }
}

/// Everything needed to create one user and their content
#[derive(Debug, Clone)]
pub struct SeedPlan {
    pub user: NewUser,
    /// Videos paired with the comment the user leaves on each
    pub content: Vec<(NewVideo, String)>,
}

/// Remaining pool entries; each draw removes what it returns.
pub struct SeedPools {
    names: Vec<(&'static str, &'static str)>,
    videos: Vec<VideoInfo>,
    comments: Vec<&'static str>,
}

impl Default for SeedPools {
    fn default() -> Self {
        Self {
            names: FIRST_NAMES.into_iter().zip(LAST_NAMES).collect(),
            videos: VIDEO_INFOS.to_vec(),
            comments: VIDEO_COMMENTS.to_vec(),
        }
    }
}

fn take<T, R: Rng>(pool: &mut Vec<T>, rng: &mut R) -> Option<T> {
    if pool.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..pool.len());
    Some(pool.swap_remove(index))
}

impl SeedPools {
    /// How many users can still be drawn
    pub fn capacity(&self) -> usize {
        self.names
            .len()
            .min(self.videos.len() / VIDEOS_PER_USER)
            .min(self.comments.len() / VIDEOS_PER_USER)
    }

    /// Draw one user with their videos and comments, or `None` once any pool
    /// runs dry.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<SeedPlan> {
        if self.capacity() == 0 {
            return None;
        }

        let (first, last) = take(&mut self.names, rng)?;
        let user = NewUser {
            email: format!("{}.{}@nerv.net", first.to_lowercase(), last.to_lowercase()),
            nick: format!("{}{}", first[..1].to_lowercase(), last),
            full_name: Some(format!("{first} {last}")),
            admin: false,
        };

        let mut content = Vec::with_capacity(VIDEOS_PER_USER);
        for _ in 0..VIDEOS_PER_USER {
            let info = take(&mut self.videos, rng)?;
            let comment = take(&mut self.comments, rng)?;
            content.push((
                NewVideo {
                    url: info.url.to_string(),
                    title: info.title.to_string(),
                    description: info.description.map(str::to_string),
                },
                comment.to_string(),
            ));
        }

        Some(SeedPlan { user, content })
    }
}

/// Draw `count` plans from fresh pools (fewer if the pools run out).
pub fn plan<R: Rng>(count: usize, rng: &mut R) -> Vec<SeedPlan> {
    let mut pools = SeedPools::default();
    (0..count).map_while(|_| pools.draw(rng)).collect()
}

/// Create every planned user with their content.
///
/// Each user is created atomically; a failure stops the run and leaves users
/// seeded so far in place.
pub async fn run(pool: &PgPool, plans: &[SeedPlan]) -> Result<Vec<UserDetail>, sqlx::Error> {
    let mut seeded = Vec::with_capacity(plans.len());
    for plan in plans {
        let detail = user_repo::create_user_with_content(pool, &plan.user, &plan.content).await?;
        tracing::info!(
            user_id = detail.user.user_id,
            nick = %detail.user.nick,
            videos = detail.videos.len(),
            "Seeded user"
        );
        seeded.push(detail);
    }
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::is_url_code;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn count_defaults_to_pool_size() {
        assert_eq!(parse_count(&[], 12), Ok(12));
    }

    #[test]
    fn count_must_be_in_range() {
        assert_eq!(parse_count(&args(&["3"]), 12), Ok(3));
        assert_eq!(parse_count(&args(&["12"]), 12), Ok(12));
        assert_eq!(
            parse_count(&args(&["0"]), 12),
            Err(UsageError::OutOfRange { count: 0, max: 12 })
        );
        assert_eq!(
            parse_count(&args(&["13"]), 12),
            Err(UsageError::OutOfRange { count: 13, max: 12 })
        );
        assert!(matches!(
            parse_count(&args(&["many"]), 12),
            Err(UsageError::NotANumber(_))
        ));
    }

    #[test]
    fn trailing_garbage_is_not_a_number() {
        assert_eq!(
            parse_count(&args(&["3abc"]), 12),
            Err(UsageError::NotANumber("3abc".into()))
        );
        assert_eq!(parse_count(&args(&[" 4 "]), 12), Ok(4));
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert_eq!(
            parse_count(&args(&["1", "2"]), 12),
            Err(UsageError::TooManyArguments)
        );
    }

    #[test]
    fn pool_data_is_valid() {
        assert_eq!(FIRST_NAMES.len(), LAST_NAMES.len());
        assert!(VIDEO_INFOS.len() >= FIRST_NAMES.len() * VIDEOS_PER_USER);
        assert!(VIDEO_COMMENTS.len() >= FIRST_NAMES.len() * VIDEOS_PER_USER);

        let urls: HashSet<_> = VIDEO_INFOS.iter().map(|v| v.url).collect();
        assert_eq!(urls.len(), VIDEO_INFOS.len());
        for info in VIDEO_INFOS {
            assert!(is_url_code(info.url), "bad url code {}", info.url);
            assert!(info.title.chars().count() >= 3);
        }
        assert!(VIDEO_INFOS.iter().any(|v| v.title.contains("Shook")));
    }

    #[test]
    fn draws_never_repeat() {
        let mut rng = StdRng::seed_from_u64(7);
        let plans = plan(FIRST_NAMES.len(), &mut rng);
        assert_eq!(plans.len(), FIRST_NAMES.len());

        let emails: HashSet<_> = plans.iter().map(|p| p.user.email.clone()).collect();
        let nicks: HashSet<_> = plans.iter().map(|p| p.user.nick.clone()).collect();
        let urls: HashSet<_> = plans
            .iter()
            .flat_map(|p| p.content.iter().map(|(v, _)| v.url.clone()))
            .collect();
        assert_eq!(emails.len(), plans.len());
        assert_eq!(nicks.len(), plans.len());
        assert_eq!(urls.len(), plans.len() * VIDEOS_PER_USER);
    }

    #[test]
    fn user_fields_follow_naming_scheme() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pools = SeedPools::default();
        let plan = pools.draw(&mut rng).unwrap();

        let full_name = plan.user.full_name.clone().unwrap();
        let (first, last) = full_name.split_once(' ').unwrap();
        assert_eq!(
            plan.user.email,
            format!("{}.{}@nerv.net", first.to_lowercase(), last.to_lowercase())
        );
        assert_eq!(
            plan.user.nick,
            format!("{}{}", first[..1].to_lowercase(), last)
        );
        assert!(plan.user.nick.len() >= 3);
        assert!(!plan.user.admin);
        assert_eq!(plan.content.len(), VIDEOS_PER_USER);
    }

    #[test]
    fn pools_run_dry() {
        let mut rng = StdRng::seed_from_u64(3);
        let plans = plan(FIRST_NAMES.len() + 5, &mut rng);
        assert_eq!(plans.len(), FIRST_NAMES.len());
    }
}
