use log::{error, info};
use ratatui::layout::Rect;
use tokio::task::JoinHandle;
use ayat_core::{
    AlignedVerseTriple, Carousel, Config, EditionClient, EditionError, Editions, RandomSource,
    SelectionWindow, VerseWindowSelector,
};

pub type LoadTask = JoinHandle<Result<Editions, EditionError>>;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub loading: bool,
    pub error: Option<String>,

    // Current window and carousel position
    pub window: SelectionWindow,
    pub carousel: Carousel,

    // Animation state
    pub animation_frame: usize,

    // Areas for mouse hit-testing (updated during render)
    pub card_area: Option<Rect>,
    pub dot_areas: Vec<Rect>,

    // Data
    pub config: Config,
    client: EditionClient,
    selector: VerseWindowSelector,
    rng: Box<dyn RandomSource>,
    forced_chapter: Option<u32>,
    load_task: Option<LoadTask>,
}

impl App {
    pub fn new(config: Config, rng: Box<dyn RandomSource>, forced_chapter: Option<u32>) -> Self {
        let selector = config.selector();

        Self {
            should_quit: false,
            loading: false,
            error: None,

            window: SelectionWindow::default(),
            carousel: Carousel::default(),

            animation_frame: 0,

            card_area: None,
            dot_areas: Vec::new(),

            config,
            client: EditionClient::new(),
            selector,
            rng,
            forced_chapter,
            load_task: None,
        }
    }

    /// "Get More Verses": refetch the editions in the background.
    /// Ignored while a load is already in flight.
    pub fn request_verses(&mut self) {
        if self.load_task.is_some() {
            return;
        }

        self.loading = true;
        self.error = None;

        let client = self.client.clone();
        let config = self.config.clone();
        self.load_task = Some(tokio::spawn(async move { client.fetch_all(&config).await }));
    }

    /// Collect a finished load, if any
    pub async fn poll_load(&mut self) {
        match &self.load_task {
            Some(task) if task.is_finished() => {}
            _ => return,
        }

        let Some(task) = self.load_task.take() else {
            return;
        };

        match task.await {
            Ok(Ok(editions)) => self.show_editions(&editions),
            Ok(Err(e)) => {
                error!("Error fetching verses: {}", e);
                self.error = Some(format!("Error fetching verses: {}", e));
            }
            Err(e) => {
                error!("Fetch task failed: {}", e);
                self.error = Some(format!("Fetch task failed: {}", e));
            }
        }

        self.loading = false;
    }

    /// Select a fresh window from loaded editions, replacing the old one
    pub fn show_editions(&mut self, editions: &Editions) {
        let window = match self.forced_chapter {
            Some(chapter) => {
                self.selector
                    .select_window_in_chapter(editions, chapter, self.rng.as_mut())
            }
            None => self.selector.select_window(editions, self.rng.as_mut()),
        };

        info!(
            "showing chapter {} from index {} ({} verses)",
            window.chapter,
            window.start_index,
            window.len()
        );

        self.carousel.reset(window.len());
        self.window = window;
    }

    pub fn current(&self) -> Option<&AlignedVerseTriple> {
        self.window.get(self.carousel.index())
    }

    pub fn next_verse(&mut self) {
        self.carousel.next();
    }

    pub fn prev_verse(&mut self) {
        self.carousel.prev();
    }

    pub fn select_verse(&mut self, index: usize) {
        self.carousel.select(index);
    }

    pub fn tick_animation(&mut self) {
        if self.loading {
            self.animation_frame = self.animation_frame.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ayat_core::{LanguageEdition, SeededRandom, VerseRecord};

    fn edition(label: &str, counts: &[(u32, u32)]) -> LanguageEdition {
        let verses = counts
            .iter()
            .flat_map(|&(chapter, count)| {
                (1..=count).map(move |verse| {
                    VerseRecord::new(chapter, verse, format!("{} {}", label, verse))
                })
            })
            .collect();
        LanguageEdition::new(label, verses).unwrap()
    }

    fn editions(counts: &[(u32, u32)]) -> Editions {
        Editions {
            original: edition("ar", counts),
            translation_a: edition("en", counts),
            translation_b: edition("ml", counts),
        }
    }

    fn app_for_chapter(chapter: u32) -> App {
        App::new(Config::new(), Box::new(SeededRandom::new(1)), Some(chapter))
    }

    #[test]
    fn test_show_editions_resets_carousel() {
        let mut app = app_for_chapter(2);
        app.carousel.reset(3);
        app.carousel.select(2);

        app.show_editions(&editions(&[(1, 7), (2, 2)]));

        assert_eq!(app.window.chapter, 2);
        assert_eq!(app.carousel.len(), 2);
        assert_eq!(app.carousel.index(), 0);
        assert_eq!(app.current().unwrap().original.verse, 1);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app_for_chapter(1);
        app.show_editions(&editions(&[(1, 7)]));
        assert_eq!(app.window.len(), 3);

        let first = app.current().unwrap().original.verse;
        app.prev_verse();
        assert_eq!(app.current().unwrap().original.verse, first + 2);
        app.next_verse();
        assert_eq!(app.current().unwrap().original.verse, first);
        app.select_verse(1);
        assert_eq!(app.current().unwrap().original.verse, first + 1);
    }

    #[test]
    fn test_empty_window_has_no_current_verse() {
        let mut app = app_for_chapter(50);
        app.show_editions(&editions(&[(1, 7)]));

        assert!(app.window.is_empty());
        assert!(app.current().is_none());
        app.next_verse();
        assert!(app.current().is_none());
    }

    #[test]
    fn test_spinner_only_moves_while_loading() {
        let mut app = app_for_chapter(1);
        app.tick_animation();
        assert_eq!(app.animation_frame, 0);

        app.loading = true;
        app.tick_animation();
        assert_eq!(app.animation_frame, 1);
    }

    /// Park a load task and wait until it has completed
    async fn finish_load(app: &mut App, result: Result<Editions, EditionError>) {
        app.loading = true;
        app.load_task = Some(tokio::spawn(async move { result }));
        while !app.load_task.as_ref().unwrap().is_finished() {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_window() {
        let mut app = app_for_chapter(1);
        app.show_editions(&editions(&[(1, 7)]));
        app.select_verse(1);
        let before = app.window.clone();

        finish_load(&mut app, Err(EditionError::EmptyEdition)).await;
        app.poll_load().await;

        assert!(!app.loading);
        assert!(app.load_task.is_none());
        assert!(app.error.as_deref().unwrap().contains("edition contains no verses"));
        assert_eq!(app.window, before);
        assert_eq!(app.carousel.index(), 1);
    }

    #[tokio::test]
    async fn test_successful_load_replaces_window() {
        let mut app = app_for_chapter(2);
        app.error = Some("old failure".to_string());

        finish_load(&mut app, Ok(editions(&[(1, 7), (2, 2)]))).await;
        app.poll_load().await;

        assert!(!app.loading);
        assert_eq!(app.window.chapter, 2);
        assert_eq!(app.window.len(), 2);
        assert_eq!(app.carousel.index(), 0);
    }

    #[tokio::test]
    async fn test_poll_without_task_is_noop() {
        let mut app = app_for_chapter(1);
        app.poll_load().await;
        assert!(!app.loading);
        assert!(app.error.is_none());
    }
}
