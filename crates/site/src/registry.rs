//! Portfolio window registry and the content rendered inside each window.

use desktop_app_contract::{
    DefaultPlacement, TerminalContext, WindowDefinition, WindowHost, WindowPosition,
    WindowRegistry, WindowRenderContext, WindowSize,
};
use leptos::*;
use system_shell_contract::HistoryEntry;

pub const PROFILE_WINDOW: &str = "profile";
pub const ABOUT_WINDOW: &str = "about";
pub const TERMINAL_WINDOW: &str = "terminal";
pub const WORKS_WINDOW: &str = "works";
pub const TEXT_EDITOR_WINDOW: &str = "text-editor";

/// Portfolio entry shown in the works window and in its own project window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub window_id: &'static str,
    pub title_key: &'static str,
    pub summary: &'static str,
    pub tags: &'static [&'static str],
    pub repository: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        window_id: "project1",
        title_key: "projects.checkpoint.title",
        summary: "Self-hosted authentication service with session auditing and argon2id hashing.",
        tags: &["nextjs", "postgresql", "typescript", "redis", "fastify"],
        repository: "https://github.com/itkla/Checkpoint",
    },
    Project {
        window_id: "project7",
        title_key: "projects.bob.title",
        summary: "Storage broker that fronts S3, GCS, Azure and B2 behind one API.",
        tags: &["rust", "s3", "gcs", "azure", "b2"],
        repository: "https://github.com/itkla/Bob",
    },
    Project {
        window_id: "project8",
        title_key: "projects.jot.title",
        summary: "Minimal desktop notepad that stays out of the way.",
        tags: &["tauri", "rust", "html5", "css"],
        repository: "https://github.com/itkla/Jot",
    },
    Project {
        window_id: "project9",
        title_key: "projects.aer.title",
        summary: "Weather dashboard experiment with offline caching.",
        tags: &["typescript", "react"],
        repository: "https://github.com/itkla/Aer",
    },
];

const PROJECT_WINDOW_SIZE: WindowSize = WindowSize::new(400.0, 300.0);

/// Builds the desktop registry. Registration order is z-order order for windows opened on mount.
pub fn portfolio_registry() -> Result<WindowRegistry<View>, String> {
    let mut registry = WindowRegistry::from_definitions([
        WindowDefinition::new(
            PROFILE_WINDOW,
            "windows.profile",
            WindowSize::new(800.0, 400.0),
            DefaultPlacement::Center,
            |_: &WindowRenderContext| view! { <ProfileWindow /> }.into_view(),
        )
        .open_on_mount(true),
        WindowDefinition::new(
            TERMINAL_WINDOW,
            "windows.terminal",
            WindowSize::new(400.0, 300.0),
            DefaultPlacement::Cascade,
            |ctx: &WindowRenderContext| view! { <TerminalWindow terminal=ctx.terminal.clone() /> }.into_view(),
        ),
        WindowDefinition::new(
            TEXT_EDITOR_WINDOW,
            "windows.textEditor",
            WindowSize::new(600.0, 500.0),
            DefaultPlacement::Cascade,
            |_: &WindowRenderContext| view! { <TextEditorWindow /> }.into_view(),
        ),
        WindowDefinition::new(
            ABOUT_WINDOW,
            "windows.about",
            WindowSize::new(800.0, 500.0),
            DefaultPlacement::Cascade,
            |_: &WindowRenderContext| view! { <AboutWindow /> }.into_view(),
        ),
        WindowDefinition::new(
            WORKS_WINDOW,
            "windows.works",
            WindowSize::new(600.0, 400.0),
            DefaultPlacement::At(WindowPosition::new(100.0, 100.0)),
            |ctx: &WindowRenderContext| view! { <WorksWindow host=ctx.host.clone() /> }.into_view(),
        ),
    ])?;

    for project in PROJECTS {
        let project = *project;
        registry.register(WindowDefinition::new(
            project.window_id,
            project.title_key,
            PROJECT_WINDOW_SIZE,
            DefaultPlacement::Cascade,
            move |_: &WindowRenderContext| view! { <ProjectWindow project=project /> }.into_view(),
        ))?;
    }
    Ok(registry)
}

#[component]
fn ProfileWindow() -> impl IntoView {
    view! {
        <article class="profile-window">
            <h1>"guest"</h1>
            <p>"Software engineer. I build backend services, developer tools and the occasional desktop in a browser tab."</p>
            <p class="hint">"Try Ctrl+T for a terminal, Ctrl+A for the about page, or drag a window to a screen edge."</p>
        </article>
    }
}

#[component]
fn AboutWindow() -> impl IntoView {
    view! {
        <article class="about-window">
            <h2>"About this desktop"</h2>
            <p>"Every window here is managed by a small window manager written in Rust and compiled to WebAssembly."</p>
            <ul>
                <li>"Drag title bars to move, the bottom-right corner to resize."</li>
                <li>"Drop a window on an edge or corner to snap it, on the top edge to maximize."</li>
                <li>"Layout is remembered between visits."</li>
            </ul>
        </article>
    }
}

#[component]
fn WorksWindow(host: WindowHost) -> impl IntoView {
    let entries = PROJECTS
        .iter()
        .map(|project| {
            let host = host.clone();
            let window_id = project.window_id;
            view! {
                <li>
                    <button class="works-entry" on:click=move |_| host.open_window(window_id)>
                        {crate::titles::title_for(project.title_key)}
                    </button>
                    <span class="works-summary">{project.summary}</span>
                </li>
            }
        })
        .collect_view();

    view! { <ul class="works-window">{entries}</ul> }
}

#[component]
fn ProjectWindow(project: Project) -> impl IntoView {
    let tags = project
        .tags
        .iter()
        .map(|tag| view! { <li class="tag">{*tag}</li> })
        .collect_view();

    view! {
        <article class="project-window">
            <h2>{crate::titles::title_for(project.title_key)}</h2>
            <p>{project.summary}</p>
            <ul class="tags">{tags}</ul>
            <a href=project.repository target="_blank" rel="noopener noreferrer">"Source"</a>
        </article>
    }
}

#[component]
fn TerminalWindow(terminal: Option<TerminalContext>) -> impl IntoView {
    let Some(terminal) = terminal else {
        return view! { <p class="terminal-unavailable">"Terminal unavailable."</p> }.into_view();
    };
    let changed = create_trigger();
    let handle = store_value(terminal);

    let history = move || {
        changed.track();
        handle.with_value(|terminal| {
            terminal.with_session(|session| {
                session
                    .history()
                    .iter()
                    .map(|entry| {
                        let class = match entry {
                            HistoryEntry::Prompt { .. } => "terminal-prompt",
                            HistoryEntry::Output { .. } => "terminal-output",
                        };
                        view! { <pre class=class>{entry.text().to_string()}</pre> }
                    })
                    .collect_view()
            })
        })
    };
    let prompt = move || {
        changed.track();
        handle.with_value(|terminal| terminal.with_session(|session| format!("{}$", session.prompt_line())))
    };
    let command = move || {
        changed.track();
        handle.with_value(|terminal| terminal.with_session(|session| session.command().to_string()))
    };
    let on_input = move |ev: ev::Event| {
        handle.with_value(|terminal| terminal.set_command(event_target_value(&ev)));
    };
    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() != "Enter" {
            return;
        }
        ev.prevent_default();
        let accepted = handle.with_value(|terminal| {
            let line = terminal.with_session(|session| session.command().to_string());
            terminal.execute(&line)
        });
        if accepted {
            changed.notify();
        }
    };

    view! {
        <div class="terminal-window">
            <div class="terminal-history">{history}</div>
            <label class="terminal-input-row">
                <span class="terminal-prompt">{prompt}</span>
                <input
                    class="terminal-input"
                    type="text"
                    spellcheck="false"
                    autocomplete="off"
                    prop:value=command
                    on:input=on_input
                    on:keydown=on_keydown
                />
            </label>
        </div>
    }
    .into_view()
}

#[component]
fn TextEditorWindow() -> impl IntoView {
    let content = create_rw_signal(String::new());
    let filename = create_rw_signal("untitled.txt".to_string());
    let modified = create_rw_signal(false);

    let title = move || {
        let marker = if modified.get() { "*" } else { "" };
        format!("{}{marker}", filename.get())
    };
    let stats = move || {
        content.with(|text| {
            format!(
                "{} lines, {} words",
                text.lines().count().max(1),
                text.split_whitespace().count()
            )
        })
    };

    view! {
        <div class="text-editor-window">
            <header class="text-editor-toolbar">
                <input
                    class="text-editor-filename"
                    type="text"
                    prop:value=move || filename.get()
                    on:input=move |ev| filename.set(event_target_value(&ev))
                />
                <button on:click=move |_| {
                    content.set(String::new());
                    modified.set(false);
                }>"New"</button>
                <span class="text-editor-title">{title}</span>
            </header>
            <textarea
                class="text-editor-body"
                spellcheck="false"
                prop:value=move || content.get()
                on:input=move |ev| {
                    content.set(event_target_value(&ev));
                    modified.set(true);
                }
            />
            <footer class="text-editor-status">{stats}</footer>
        </div>
    }
}
