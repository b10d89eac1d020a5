//! Command-line front end over the container

use argh::FromArgs;
use tracing::info;

use crate::catalog::{Anime, DurationType, HomeContent, TriviaDifficulty};
use crate::config::{self, Backend, Config};
use crate::container::AppContainer;
use crate::error::{Error, Result};
use crate::state::{
    AnimeDetailState, FavoritesModel, HomeState, PreferencesForm, QuizState, TriviaPlayState,
};

/// Anime discovery and cultural trivia
#[derive(Debug, FromArgs)]
pub struct Args {
    /// anime backend: "fake" or "remote". Defaults to the config file.
    #[argh(option)]
    pub backend: Option<Backend>,

    #[argh(subcommand)]
    pub command: Command,
}

#[derive(Debug, FromArgs)]
#[argh(subcommand)]
pub enum Command {
    Home(HomeArgs),
    Detail(DetailArgs),
    Favorites(FavoritesArgs),
    Search(SearchArgs),
    Genres(GenresArgs),
    Trivia(TriviaArgs),
    Preferences(PreferencesArgs),
    Profile(ProfileArgs),
    Config(ConfigArgs),
}

/// show the featured anime and one section per preferred genre
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "home")]
pub struct HomeArgs {}

/// show an anime's detail page
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "detail")]
pub struct DetailArgs {
    /// anime id
    #[argh(positional)]
    pub id: u64,

    /// toggle the anime in favorites before printing
    #[argh(switch, short = 'f')]
    pub favorite: bool,
}

/// list favorites, adding or removing some first
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "favorites")]
pub struct FavoritesArgs {
    /// anime id to add, may be repeated
    #[argh(option)]
    pub add: Vec<u64>,

    /// anime id to remove, may be repeated
    #[argh(option)]
    pub remove: Vec<u64>,
}

/// search anime by title
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "search")]
pub struct SearchArgs {
    /// search text
    #[argh(positional)]
    pub query: String,
}

/// list the available genres
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "genres")]
pub struct GenresArgs {}

/// play a trivia quiz for one anime
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "trivia")]
pub struct TriviaArgs {
    /// anime id
    #[argh(positional)]
    pub anime_id: u64,

    /// easy, medium or hard
    #[argh(option, short = 'd')]
    pub difficulty: TriviaDifficulty,

    /// comma separated answer indexes, e.g. "0,2,1". Without it the
    /// questions are only listed.
    #[argh(option, short = 'a')]
    pub answers: Option<String>,
}

/// show or change preferred genres and episode durations
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "preferences")]
pub struct PreferencesArgs {
    /// comma separated genre ids to toggle, e.g. "2,5"
    #[argh(option, short = 'g')]
    pub genres: Option<String>,

    /// comma separated durations to toggle: short, medium, long
    #[argh(option, short = 'd')]
    pub durations: Option<String>,

    /// start from an empty selection, as first-run onboarding does
    #[argh(switch)]
    pub onboarding: bool,
}

/// show the user profile, optionally updating account info first
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "profile")]
pub struct ProfileArgs {
    /// new display name
    #[argh(option)]
    pub name: Option<String>,

    /// new email address
    #[argh(option)]
    pub email: Option<String>,

    /// new nickname
    #[argh(option)]
    pub nickname: Option<String>,
}

/// print the config file path and values
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "config")]
pub struct ConfigArgs {}

fn parse_answers(raw: &str) -> Result<Vec<usize>> {
    split_list(raw)
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| Error::InvalidInput(format!("not an answer index: {}", s)))
        })
        .collect()
}

impl Args {
    pub async fn run(self, config: Config) -> Result<()> {
        if let Command::Config(_) = self.command {
            return print_config(&config);
        }

        let backend = self.backend.unwrap_or(config.general.backend);
        let container = AppContainer::with_backend(&config, backend)?;
        info!(%backend, "Running command");

        match self.command {
            Command::Home(_) => home(&container).await,
            Command::Detail(args) => detail(&container, args).await,
            Command::Favorites(args) => favorites(&container, args).await,
            Command::Search(args) => search(&container, &args.query).await,
            Command::Genres(_) => genres(&container).await,
            Command::Trivia(args) => trivia(&container, args).await,
            Command::Preferences(args) => preferences(&container, args).await,
            Command::Profile(args) => profile(&container, args).await,
            Command::Config(_) => print_config(&config),
        }
    }
}

fn anime_line(anime: &Anime) -> String {
    let year = anime
        .release_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "?".to_string());
    format!(
        "[{}] {} ({}, {}, {})",
        anime.id,
        anime.title,
        year,
        anime.duration_type.as_display(),
        anime.emission_status.as_display()
    )
}

fn print_home(content: &HomeContent) {
    println!("Featured: {}", anime_line(&content.hero_anime));
    for section in &content.sections {
        if section.is_degraded() {
            println!("\n{} (unavailable)", section.genre.name);
            continue;
        }
        println!("\n{}", section.genre.name);
        if section.animes.is_empty() {
            println!("  nothing here yet");
        }
        for anime in &section.animes {
            println!("  {}", anime_line(anime));
        }
    }
}

async fn home(container: &AppContainer) -> Result<()> {
    let mut model = container.home_model();
    match model.load().await {
        HomeState::Success(content) => {
            print_home(content);
            Ok(())
        }
        HomeState::Error(message) => Err(Error::Remote(message.clone())),
        HomeState::Loading => Ok(()),
    }
}

async fn detail(container: &AppContainer, args: DetailArgs) -> Result<()> {
    let mut model = container.detail_model(args.id);
    model.load().await;
    if args.favorite {
        model.toggle_favorite().await?;
    }

    let (detail, is_favorite) = match model.state() {
        AnimeDetailState::Success {
            detail,
            is_favorite,
        } => (detail, *is_favorite),
        AnimeDetailState::Error(message) => return Err(Error::Remote(message.clone())),
        AnimeDetailState::Loading => return Ok(()),
    };

    let anime = &detail.anime;
    println!("{}", anime_line(anime));
    if let Some(original) = &anime.original_title {
        println!("Original title: {}", original);
    }
    let genres: Vec<&str> = anime.genres.iter().map(|g| g.name.as_str()).collect();
    println!("Genres: {}", genres.join(", "));
    println!("Favorite: {}", if is_favorite { "yes" } else { "no" });
    println!("\n{}", anime.synopsis);

    if !detail.cultural_notes.is_empty() {
        println!("\nCultural notes:");
        for note in &detail.cultural_notes {
            println!("  - {}", note);
        }
    }
    if !detail.trailers.is_empty() {
        println!("\nTrailers:");
        for trailer in &detail.trailers {
            println!(
                "  {:>3}. {} ({} min) {}",
                trailer.number, trailer.title, trailer.duration_minutes, trailer.youtube_url
            );
        }
    }
    Ok(())
}

fn print_favorites(model: &mut FavoritesModel) {
    let items = model.items();
    if items.is_empty() {
        println!("No favorites yet");
    }
    for anime in &items {
        println!("{}", anime_line(anime));
    }
}

async fn favorites(container: &AppContainer, args: FavoritesArgs) -> Result<()> {
    let mut model = container.favorites_model();
    let use_case = container.detail_use_case();
    for id in args.add {
        let detail = use_case.execute(id).await?;
        container.favorites_repository.add_favorite(detail.anime).await?;
    }
    for id in args.remove {
        model.remove(id).await?;
    }

    if model.has_updates() {
        info!("Favorites changed");
    }
    print_favorites(&mut model);
    Ok(())
}

async fn search(container: &AppContainer, query: &str) -> Result<()> {
    let results = container.anime_repository.search_anime(query).await?;
    if results.is_empty() {
        println!("No anime matches \"{}\"", query);
    }
    for anime in &results {
        println!("{}", anime_line(anime));
    }
    Ok(())
}

async fn genres(container: &AppContainer) -> Result<()> {
    for genre in container.anime_repository.get_genres().await? {
        println!("{:>4}  {}", genre.id, genre.name);
    }
    Ok(())
}

fn print_questions(quiz: &QuizState) {
    for (number, question) in quiz.questions.iter().enumerate() {
        println!("{}. {}", number + 1, question.question);
        for (index, option) in question.options.iter().enumerate() {
            println!("   {}) {}", index, option);
        }
    }
}

fn ready(state: &TriviaPlayState) -> Result<&QuizState> {
    match state {
        TriviaPlayState::Ready(quiz) => Ok(quiz),
        TriviaPlayState::Error(message) => Err(Error::Trivia(message.clone())),
        TriviaPlayState::Loading => Err(Error::Trivia("quiz is still loading".to_string())),
    }
}

async fn trivia(container: &AppContainer, args: TriviaArgs) -> Result<()> {
    let mut play = container.trivia_play(args.anime_id);
    play.load().await;
    ready(play.state())?;
    play.select_difficulty(args.difficulty).await;
    let quiz = ready(play.state())?;

    println!(
        "{} trivia, {} ({})",
        quiz.anime.title,
        args.difficulty.as_display(),
        args.difficulty.description()
    );
    if quiz.questions.is_empty() {
        println!("No questions available");
        return Ok(());
    }

    let Some(raw) = args.answers else {
        print_questions(quiz);
        return Ok(());
    };
    let answers = parse_answers(&raw)?;
    if answers.len() != quiz.total_questions() {
        return Err(Error::InvalidInput(format!(
            "expected {} answers, got {}",
            quiz.total_questions(),
            answers.len()
        )));
    }

    for answer in answers {
        play.answer(answer);
        let quiz = ready(play.state())?;
        if let Some(question) = quiz.current_question() {
            if quiz.is_answer_correct == Some(true) {
                println!("{} -> {} (correct)", question.question, answer);
            } else {
                let correct = question.correct_answer().unwrap_or("?");
                println!("{} -> {} (wrong, answer: {})", question.question, answer, correct);
            }
        }
        play.next().await?;
    }

    let quiz = ready(play.state())?;
    println!("\nScore: {}/{}", quiz.score, quiz.total_questions());

    let summaries = container.trivia_repository.get_trivia_summaries().await?;
    if let Some(summary) = summaries.iter().find(|s| s.anime.id == args.anime_id) {
        println!(
            "Best: {}/{}",
            summary.best_score, summary.total_questions
        );
    }
    let stats = container.trivia_repository.profile_stats().await?;
    println!(
        "Answered overall: {} ({}), perfect runs: {}",
        stats.total_answered, stats.mastery_level, stats.perfect_runs
    );
    Ok(())
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn print_preferences(form: &PreferencesForm) {
    let settings = form.to_settings();
    let genres: Vec<&str> = settings.preferred_genres.iter().map(|g| g.name.as_str()).collect();
    let durations: Vec<&str> = settings
        .preferred_durations
        .iter()
        .map(|d| d.as_display())
        .collect();
    println!("Genres: {}", genres.join(", "));
    println!("Durations: {}", durations.join(", "));
}

async fn preferences(container: &AppContainer, args: PreferencesArgs) -> Result<()> {
    let genres = container.anime_repository.get_genres().await?;
    let users = container.user_repository.as_ref();
    let mut form = PreferencesForm::load(users, genres, args.onboarding).await?;

    if args.genres.is_none() && args.durations.is_none() {
        print_preferences(&form);
        return Ok(());
    }

    for id in args.genres.as_deref().map(split_list).into_iter().flatten() {
        if !form.available_genres().iter().any(|g| g.id == id) {
            return Err(Error::InvalidInput(format!("unknown genre id: {}", id)));
        }
        form.toggle_genre(id);
    }
    for raw in args.durations.as_deref().map(split_list).into_iter().flatten() {
        let duration: DurationType = raw.parse().map_err(Error::InvalidInput)?;
        form.toggle_duration(duration);
    }

    form.save(users).await?;
    println!("Saved.");
    print_preferences(&form);
    Ok(())
}

async fn profile(container: &AppContainer, args: ProfileArgs) -> Result<()> {
    let users = &container.user_repository;
    let mut profile = users.get_user_profile().await?;

    if args.name.is_some() || args.email.is_some() || args.nickname.is_some() {
        let name = args.name.unwrap_or_else(|| profile.name.clone());
        let email = args.email.unwrap_or_else(|| profile.email.clone());
        let nickname = args.nickname.unwrap_or_else(|| profile.nickname.clone());
        profile = users.update_account_info(&name, &email, &nickname).await?;
    }

    println!("{} (@{})", profile.name, profile.nickname);
    println!("Email: {}", profile.email);
    println!("Level: {} ({} xp)", profile.knowledge_level, profile.xp_points);
    let genres: Vec<&str> = profile.favorite_genres.iter().map(|g| g.name.as_str()).collect();
    println!("Favorite genres: {}", genres.join(", "));
    println!("Preferred duration: {}", profile.preferred_duration.as_display());

    let stats = container.trivia_repository.profile_stats().await?;
    println!(
        "Trivia: {} answered, {} perfect runs, {}",
        stats.total_answered, stats.perfect_runs, stats.mastery_level
    );
    Ok(())
}

fn print_config(config: &Config) -> Result<()> {
    let path = config::config_path()?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(config)?);
    println!("# resolved base url: {}", config.resolve_base_url());
    Ok(())
}
