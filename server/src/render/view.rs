//! Leptos UI tree rendered to static markup.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components take plain props instead of signals: a server render reads one
//! request-scoped `CatalogState` and produces markup once. The browser bundle
//! hydrates from the snapshot embedded next to this markup.

use catalog::{CatalogState, Movie, SessionState};
use leptos::prelude::*;
use leptos::reactive::owner::Owner;
use sha2::{Digest, Sha256};

// =============================================================================
// PAGES
// =============================================================================

/// UI route resolved from a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    Register,
    Player(String),
    NotFound,
}

impl Page {
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            _ => match trimmed.strip_prefix("/player/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::Player(id.to_owned()),
                _ => Self::NotFound,
            },
        }
    }
}

/// Render `page` against `state` into an HTML fragment.
#[must_use]
pub fn render_markup(state: &CatalogState, page: &Page) -> String {
    let state = state.clone();
    let page = page.clone();
    Owner::new().with(move || view! { <App state=state page=page /> }.to_html())
}

/// Gravatar image for an email (SHA-256 of the trimmed, lowercased address).
#[must_use]
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!("https://gravatar.com/avatar/{digest:x}")
}

// =============================================================================
// LAYOUT
// =============================================================================

#[component]
fn App(state: CatalogState, page: Page) -> impl IntoView {
    let is_home = matches!(page, Page::Home);
    let user = state.user.clone();
    let body = match page {
        Page::Home => view! { <Home state=state /> }.into_any(),
        Page::Login => {
            let error = state.user.error;
            view! { <Login error=error /> }.into_any()
        }
        Page::Register => {
            let error = state.user.error;
            view! { <Register error=error /> }.into_any()
        }
        Page::Player(_) => {
            let movie = state.playing;
            view! { <Player movie=movie /> }.into_any()
        }
        Page::NotFound => view! { <NotFound /> }.into_any(),
    };

    view! {
        <div class="App">
            <Header user=user is_home=is_home />
            {body}
            <footer class="footer">
                <a href="/">"Terms of use"</a>
                <a href="/">"Privacy"</a>
                <a href="/">"Help"</a>
            </footer>
        </div>
    }
}

#[component]
fn Header(user: SessionState, is_home: bool) -> impl IntoView {
    let menu = is_home.then(|| {
        if user.has_user() {
            let avatar = gravatar_url(&user.email);
            let alt = user.name.clone();
            let name = user.name.clone();
            view! {
                <div class="header__menu">
                    <div class="header__menu--profile">
                        <img src=avatar alt=alt />
                        <p>"Profile"</p>
                    </div>
                    <ul>
                        <li><a href="/">{name}</a></li>
                        <li>
                            <form method="post" action="/auth/sign-out">
                                <button type="submit">"Log out"</button>
                            </form>
                        </li>
                    </ul>
                </div>
            }
            .into_any()
        } else {
            view! {
                <div class="header__menu">
                    <div class="header__menu--profile">
                        <img src="/assets/user-icon.png" alt="Anonymous user" />
                        <p>"Profile"</p>
                    </div>
                    <ul>
                        <li><a href="/login">"Log in"</a></li>
                    </ul>
                </div>
            }
            .into_any()
        }
    });

    view! {
        <header class="header">
            <a href="/">
                <img class="header__img" src="/assets/logo.png" alt="Movie Catalog" />
            </a>
            {menu}
        </header>
    }
}

// =============================================================================
// HOME
// =============================================================================

#[component]
fn Home(state: CatalogState) -> impl IntoView {
    let CatalogState { my_list, trends, originals, .. } = state;
    let my_list = (!my_list.is_empty()).then(|| view! { <Category title="My list" movies=my_list /> });

    view! {
        <section class="main">
            <h2 class="main__title">"What do you want to watch today?"</h2>
            <input type="text" class="input" placeholder="Search..." />
        </section>
        {my_list}
        <Category title="Trends" movies=trends />
        <Category title="Originals" movies=originals />
    }
}

#[component]
fn Category(title: &'static str, movies: Vec<Movie>) -> impl IntoView {
    view! {
        <div class="categories">
            <h3 class="categories__title">{title}</h3>
            <section class="carousel">
                <div class="carousel__container">
                    {movies.into_iter().map(|movie| view! { <CarouselItem movie=movie /> }).collect_view()}
                </div>
            </section>
        </div>
    }
}

#[component]
fn CarouselItem(movie: Movie) -> impl IntoView {
    let Movie { id, title, cover, year, content_rating, duration, .. } = movie;
    let href = format!("/player/{id}");
    let subtitle = format!("{year} {content_rating} {duration} minutes");
    let alt = title.clone();

    view! {
        <div class="carousel-item">
            <img class="carousel-item__img" src=cover alt=alt />
            <div class="carousel-item__details">
                <a class="carousel-item__details--play" href=href>"Play"</a>
                <p class="carousel-item__details--title">{title}</p>
                <p class="carousel-item__details--subtitle">{subtitle}</p>
            </div>
        </div>
    }
}

// =============================================================================
// AUTH FORMS
// =============================================================================

#[component]
fn FormError(error: String) -> impl IntoView {
    (!error.is_empty()).then(|| view! { <p class="form__error">{error}</p> })
}

#[component]
fn Login(error: String) -> impl IntoView {
    view! {
        <section class="login">
            <section class="login__container">
                <h2>"Sign in"</h2>
                <FormError error=error />
                <form class="login__container--form">
                    <input name="email" class="input" type="text" placeholder="Email" />
                    <input name="password" class="input" type="password" placeholder="Password" />
                    <button class="button" type="submit">"Sign in"</button>
                    <div class="login__container--remember-me">
                        <label>
                            <input type="checkbox" name="rememberMe" value="true" />
                            "Remember me"
                        </label>
                    </div>
                </form>
                <p class="login__container--register">
                    "No account yet? "
                    <a href="/register">"Register"</a>
                </p>
            </section>
        </section>
    }
}

#[component]
fn Register(error: String) -> impl IntoView {
    view! {
        <section class="register">
            <section class="register__container">
                <h2>"Create an account"</h2>
                <FormError error=error />
                <form class="register__container--form">
                    <input name="name" class="input" type="text" placeholder="Name" />
                    <input name="email" class="input" type="text" placeholder="Email" />
                    <input name="password" class="input" type="password" placeholder="Password" />
                    <button class="button" type="submit">"Register"</button>
                </form>
                <a href="/login">"Sign in"</a>
            </section>
        </section>
    }
}

// =============================================================================
// PLAYER / NOT FOUND
// =============================================================================

#[component]
fn Player(movie: Option<Movie>) -> impl IntoView {
    match movie {
        Some(movie) => {
            let source = movie.source;
            view! {
                <div class="Player">
                    <video controls="controls" autoplay="autoplay">
                        <source src=source type="video/mp4" />
                    </video>
                    <div class="Player-back">
                        <a href="/">"Back"</a>
                    </div>
                </div>
            }
            .into_any()
        }
        None => view! { <NotFound /> }.into_any(),
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"404"</h1>
            <p>"Page not found"</p>
            <a href="/">"Back to the catalog"</a>
        </section>
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
