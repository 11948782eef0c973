//! Built-in sample catalog used when the remote service is unavailable.
//!
//! The set is fixed and never mutated; any reordering (shuffle, rating
//! sort) is presentation policy applied by the facade, not a property of
//! this data.

use lazy_static::lazy_static;

use super::Movie;

lazy_static! {
    static ref SAMPLE_MOVIES: Vec<Movie> = vec![
        Movie {
            id: 550,
            title: "Fight Club".to_string(),
            overview: "An insomniac office worker and a devil-may-care soapmaker form an \
                       underground fight club that evolves into much more."
                .to_string(),
            backdrop_path: Some("https://picsum.photos/1280/720?random=1".to_string()),
            poster_path: Some("https://picsum.photos/500/750?random=1".to_string()),
            vote_average: Some(8.8),
            release_date: Some("1999-10-15".to_string()),
        },
        Movie {
            id: 238,
            title: "The Godfather".to_string(),
            overview: "The aging patriarch of an organized crime dynasty transfers control \
                       of his clandestine empire to his youngest son."
                .to_string(),
            backdrop_path: Some("https://picsum.photos/1280/720?random=2".to_string()),
            poster_path: Some("https://picsum.photos/500/750?random=2".to_string()),
            vote_average: Some(9.2),
            release_date: Some("1972-03-14".to_string()),
        },
        Movie {
            id: 155,
            title: "The Dark Knight".to_string(),
            overview: "When the menace known as the Joker wreaks havoc and chaos on the \
                       people of Gotham, Batman must accept one of the greatest \
                       psychological and physical tests."
                .to_string(),
            backdrop_path: Some("https://picsum.photos/1280/720?random=3".to_string()),
            poster_path: Some("https://picsum.photos/500/750?random=3".to_string()),
            vote_average: Some(9.0),
            release_date: Some("2008-07-18".to_string()),
        },
        Movie {
            id: 680,
            title: "Pulp Fiction".to_string(),
            overview: "The lives of two mob hitmen, a boxer, a gangster and his wife \
                       intertwine in four tales of violence and redemption."
                .to_string(),
            backdrop_path: Some("https://picsum.photos/1280/720?random=4".to_string()),
            poster_path: Some("https://picsum.photos/500/750?random=4".to_string()),
            vote_average: Some(8.9),
            release_date: Some("1994-10-14".to_string()),
        },
        Movie {
            id: 278,
            title: "The Shawshank Redemption".to_string(),
            overview: "Two imprisoned men bond over a number of years, finding solace and \
                       eventual redemption through acts of common decency."
                .to_string(),
            backdrop_path: Some("https://picsum.photos/1280/720?random=5".to_string()),
            poster_path: Some("https://picsum.photos/500/750?random=5".to_string()),
            vote_average: Some(9.3),
            release_date: Some("1994-09-23".to_string()),
        },
        Movie {
            id: 603,
            title: "The Matrix".to_string(),
            overview: "A computer programmer discovers that reality as he knows it is a \
                       simulation created by machines."
                .to_string(),
            backdrop_path: Some("https://picsum.photos/1280/720?random=6".to_string()),
            poster_path: Some("https://picsum.photos/500/750?random=6".to_string()),
            vote_average: Some(8.7),
            release_date: Some("1999-03-31".to_string()),
        },
        Movie {
            id: 27205,
            title: "Interstellar".to_string(),
            overview: "A team of explorers travel through a wormhole in space in an \
                       attempt to ensure humanity's survival."
                .to_string(),
            backdrop_path: Some("https://picsum.photos/1280/720?random=7".to_string()),
            poster_path: Some("https://picsum.photos/500/750?random=7".to_string()),
            vote_average: Some(8.6),
            release_date: Some("2014-11-07".to_string()),
        },
        Movie {
            id: 13,
            title: "Forrest Gump".to_string(),
            overview: "The presidencies of Kennedy and Johnson unfold from the perspective \
                       of an Alabama man with an IQ of 75."
                .to_string(),
            backdrop_path: Some("https://picsum.photos/1280/720?random=8".to_string()),
            poster_path: Some("https://picsum.photos/500/750?random=8".to_string()),
            vote_average: Some(8.8),
            release_date: Some("1994-07-06".to_string()),
        },
    ];
}

/// The full sample set, in insertion order.
pub fn sample_movies() -> Vec<Movie> {
    SAMPLE_MOVIES.clone()
}

/// Case-insensitive substring match against title and overview.
/// An empty needle matches every record.
pub fn search_sample_movies(query: &str) -> Vec<Movie> {
    let needle = query.to_lowercase();
    SAMPLE_MOVIES
        .iter()
        .filter(|movie| {
            movie.title.to_lowercase().contains(&needle)
                || movie.overview.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Look up one sample movie by id, defaulting to the first record
/// so a detail view always has something to show.
pub fn sample_movie_by_id(id: i64) -> Movie {
    SAMPLE_MOVIES
        .iter()
        .find(|movie| movie.id == id)
        .unwrap_or(&SAMPLE_MOVIES[0])
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_is_stable() {
        let movies = sample_movies();
        assert_eq!(movies.len(), 8);
        assert_eq!(movies[0].id, 550);
        assert_eq!(movies[0].title, "Fight Club");
        assert_eq!(movies[7].id, 13);
    }

    #[test]
    fn search_matches_title_case_insensitively() {
        let hits = search_sample_movies("fight");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Fight Club");
    }

    #[test]
    fn search_matches_overview_text() {
        // "wormhole" appears only in the Interstellar overview
        let hits = search_sample_movies("WORMHOLE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 27205);
    }

    #[test]
    fn search_without_match_is_empty() {
        assert!(search_sample_movies("zzzznomatch").is_empty());
    }

    #[test]
    fn empty_needle_matches_everything() {
        assert_eq!(search_sample_movies("").len(), 8);
    }

    #[test]
    fn unknown_id_falls_back_to_first_record() {
        assert_eq!(sample_movie_by_id(680).id, 680);
        assert_eq!(sample_movie_by_id(999999).id, 550);
    }
}
