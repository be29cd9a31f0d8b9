//! End-to-end session scenarios driven through `SessionDriver` with a
//! provider whose loads complete only when the test says so.

use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future::{FutureExt, LocalBoxFuture};
use kinoteka::app::Selection;
use kinoteka::media::{LoadResult, PlaybackPhase};
use kinoteka::{
    AppState, AssetProvider, AssetRef, Catalog, ColorScheme, Intent, KinotekaError, MediaKind, MediaResource,
    MovieId, MovieRecord, Result, SessionDriver,
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Clip that tracks how many instances are alive (loaded and not released).
#[derive(Debug)]
struct TrackedClip {
    live: Rc<Cell<i32>>,
}

impl MediaResource for TrackedClip {
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    fn release(self: Box<Self>) -> Result<()> {
        self.live.set(self.live.get() - 1);
        Ok(())
    }
}

struct PendingLoad {
    movie_id: MovieId,
    kind: MediaKind,
    reply: oneshot::Sender<LoadResult>,
}

#[derive(Clone, Default)]
struct ScriptedProvider {
    pending: Rc<RefCell<VecDeque<PendingLoad>>>,
    live: Rc<Cell<i32>>,
}

impl ScriptedProvider {
    fn live(&self) -> i32 {
        self.live.get()
    }

    fn outstanding(&self) -> usize {
        self.pending.borrow().len()
    }

    fn next_request(&self) -> (MovieId, MediaKind) {
        let pending = self.pending.borrow();
        let load = pending.front().expect("a load should be pending");
        (load.movie_id, load.kind)
    }

    /// Completes the oldest load with a fresh clip.
    fn succeed_next(&self) {
        let load = self.pending.borrow_mut().pop_front().expect("a load should be pending");
        self.live.set(self.live.get() + 1);
        let clip = Box::new(TrackedClip {
            live: Rc::clone(&self.live),
        });
        if let Err(Ok(orphan)) = load.reply.send(Ok(clip)) {
            orphan.release().unwrap();
        }
    }

    /// Fails the oldest load.
    fn fail_next(&self, reason: &str) {
        let load = self.pending.borrow_mut().pop_front().expect("a load should be pending");
        let _ = load.reply.send(Err(KinotekaError::MediaLoad {
            movie_id: load.movie_id,
            reason: reason.to_string(),
        }));
    }
}

impl AssetProvider for ScriptedProvider {
    fn load(&self, movie_id: MovieId, kind: MediaKind, _asset: &AssetRef) -> LocalBoxFuture<'static, LoadResult> {
        let (reply, response) = oneshot::channel();
        self.pending.borrow_mut().push_back(PendingLoad { movie_id, kind, reply });
        response
            .map(move |outcome| {
                outcome.unwrap_or_else(|_| {
                    Err(KinotekaError::MediaLoad {
                        movie_id,
                        reason: "provider dropped the load".into(),
                    })
                })
            })
            .boxed_local()
    }
}

fn two_movie_catalog() -> Catalog {
    Catalog::new(vec![
        MovieRecord::new(1, "Пчеловод", "Драма", "images/bee.jpg")
            .with_audio("audio/beekeeper.mp3")
            .with_video("videos/beekeeper.mp4"),
        MovieRecord::new(2, "Револьвер", "Экшн", "images/revol.jpg")
            .with_audio("audio/revolver.mp3")
            .with_video("videos/revolver.mp4"),
    ])
    .unwrap()
}

fn driver() -> (SessionDriver<ScriptedProvider>, ScriptedProvider) {
    let provider = ScriptedProvider::default();
    let state = AppState::new(two_movie_catalog(), ColorScheme::Light);
    (SessionDriver::new(state, provider.clone()), provider)
}

fn visible_ids(driver: &SessionDriver<ScriptedProvider>) -> Vec<u32> {
    driver.state().visible_movies().iter().map(|m| m.id.0).collect()
}

fn favorite_ids(driver: &SessionDriver<ScriptedProvider>) -> Vec<u32> {
    driver.state().favorite_movies().iter().map(|m| m.id.0).collect()
}

fn play(driver: &mut SessionDriver<ScriptedProvider>, id: u32) {
    driver
        .dispatch(Intent::PlayMedia { id: MovieId(id), kind: None })
        .unwrap();
}

fn select(driver: &mut SessionDriver<ScriptedProvider>, id: u32) {
    driver.dispatch(Intent::SelectMovie { id: MovieId(id) }).unwrap();
}

#[test]
fn title_query_is_case_insensitive_substring() {
    let (mut driver, _) = driver();
    driver
        .dispatch(Intent::SetTitleQuery { text: "рево".into() })
        .unwrap();
    assert_eq!(visible_ids(&driver), vec![2]);
}

#[test]
fn genre_filter_selects_exact_genre() {
    let (mut driver, _) = driver();
    driver
        .dispatch(Intent::SetGenre { genre: "Экшн".into() })
        .unwrap();
    assert_eq!(visible_ids(&driver), vec![2]);

    driver.dispatch(Intent::SetGenre { genre: "all".into() }).unwrap();
    assert_eq!(visible_ids(&driver), vec![1, 2]);
}

#[test]
fn empty_criteria_show_whole_catalog() {
    let (mut driver, _) = driver();
    driver
        .dispatch(Intent::SetTitleQuery { text: "пчел".into() })
        .unwrap();
    driver.dispatch(Intent::ClearFilters).unwrap();
    assert_eq!(visible_ids(&driver), vec![1, 2]);
}

#[test]
fn double_favorite_toggle_leaves_no_favorites() {
    let (mut driver, _) = driver();
    driver.dispatch(Intent::ToggleFavorite { id: MovieId(1) }).unwrap();
    assert_eq!(favorite_ids(&driver), vec![1]);
    driver.dispatch(Intent::ToggleFavorite { id: MovieId(1) }).unwrap();
    assert!(favorite_ids(&driver).is_empty());
}

#[test]
fn load_completing_after_switching_movies_is_discarded() {
    let (mut driver, provider) = driver();

    select(&mut driver, 1);
    play(&mut driver, 1);
    assert_eq!(provider.next_request(), (MovieId(1), MediaKind::Audio));

    select(&mut driver, 2);
    assert!(!driver.state().playback_active());

    provider.succeed_next();
    driver.poll_ready().unwrap();

    assert_eq!(provider.live(), 0, "stale clip must be released");
    assert_eq!(driver.state().playback().active_resources(), 0);
    assert_eq!(driver.state().selection(), Selection::Open(MovieId(2)));
    assert!(!driver.state().playback_active());

    play(&mut driver, 2);
    provider.succeed_next();
    driver.poll_ready().unwrap();

    assert_eq!(provider.live(), 1);
    assert_eq!(driver.state().playback().source_movie(), Some(MovieId(2)));
    assert_eq!(driver.state().playback().phase(), PlaybackPhase::Playing);
}

#[test]
fn closing_detail_releases_playing_clip() {
    let (mut driver, provider) = driver();

    select(&mut driver, 1);
    play(&mut driver, 1);
    provider.succeed_next();
    driver.poll_ready().unwrap();
    assert!(driver.state().playback_active());
    assert_eq!(provider.live(), 1);

    driver.dispatch(Intent::CloseDetail).unwrap();

    assert!(!driver.state().playback_active());
    assert_eq!(driver.state().playback().active_resources(), 0);
    assert_eq!(provider.live(), 0);
    assert_eq!(driver.state().selection(), Selection::Closed);
}

#[test]
fn closing_during_load_discards_late_clip() {
    let (mut driver, provider) = driver();

    select(&mut driver, 1);
    play(&mut driver, 1);
    driver.dispatch(Intent::CloseDetail).unwrap();
    assert!(!driver.state().playback_active());

    provider.succeed_next();
    block_on(driver.settle()).unwrap();

    assert_eq!(provider.live(), 0);
    assert!(!driver.state().playback_active());
    assert_eq!(driver.pending_loads(), 0);
}

#[test]
fn repeated_play_keeps_at_most_one_clip() {
    let (mut driver, provider) = driver();
    select(&mut driver, 1);

    play(&mut driver, 1);
    driver
        .dispatch(Intent::PlayMedia { id: MovieId(1), kind: Some(MediaKind::Video) })
        .unwrap();
    play(&mut driver, 1);
    assert_eq!(provider.outstanding(), 3);

    // Older loads complete first and must be discarded.
    while provider.outstanding() > 0 {
        provider.succeed_next();
        driver.poll_ready().unwrap();
        assert!(driver.state().playback().active_resources() <= 1);
        assert!(provider.live() <= 1);
    }

    assert_eq!(provider.live(), 1);
    assert_eq!(driver.state().playback().kind(), Some(MediaKind::Audio));

    driver.dispatch(Intent::StopMedia).unwrap();
    assert_eq!(provider.live(), 0);
}

#[test]
fn play_while_playing_releases_before_loading() {
    let (mut driver, provider) = driver();
    select(&mut driver, 2);
    play(&mut driver, 2);
    provider.succeed_next();
    driver.poll_ready().unwrap();
    assert_eq!(provider.live(), 1);

    driver
        .dispatch(Intent::PlayMedia { id: MovieId(2), kind: Some(MediaKind::Video) })
        .unwrap();
    assert_eq!(provider.live(), 0);
    assert_eq!(driver.state().playback().phase(), PlaybackPhase::Loading);
}

#[test]
fn failed_load_is_reported_without_leaving_a_handle() {
    let (mut driver, provider) = driver();
    select(&mut driver, 1);
    play(&mut driver, 1);

    provider.fail_next("codec not supported");
    driver.poll_ready().unwrap();

    assert!(!driver.state().playback_active());
    assert_eq!(driver.state().selection(), Selection::Open(MovieId(1)));
    let failures = driver.take_failures();
    assert!(matches!(failures[..], [KinotekaError::MediaLoad { movie_id: MovieId(1), .. }]));
}

#[test]
fn unknown_ids_never_corrupt_state() {
    let (mut driver, _) = driver();
    select(&mut driver, 1);
    driver.dispatch(Intent::ToggleFavorite { id: MovieId(2) }).unwrap();

    select(&mut driver, 99);
    driver.dispatch(Intent::ToggleFavorite { id: MovieId(99) }).unwrap();
    play(&mut driver, 99);

    assert_eq!(driver.state().selection(), Selection::Open(MovieId(1)));
    assert_eq!(favorite_ids(&driver), vec![2]);
    assert!(!driver.state().playback_active());
    assert_eq!(driver.take_failures().len(), 3);
}

#[test]
fn play_for_closed_movie_is_rejected() {
    let (mut driver, provider) = driver();
    select(&mut driver, 1);
    play(&mut driver, 2);

    assert_eq!(provider.outstanding(), 0);
    assert!(matches!(driver.take_failures()[..], [KinotekaError::NotOpen(MovieId(2))]));
}

#[test]
fn dropping_the_driver_releases_active_clip() {
    let (mut driver, provider) = driver();
    select(&mut driver, 1);
    play(&mut driver, 1);
    provider.succeed_next();
    driver.poll_ready().unwrap();
    assert_eq!(provider.live(), 1);

    drop(driver);
    assert_eq!(provider.live(), 0);
}
