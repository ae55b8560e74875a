use crate::{
    browser::{self, BrowserProbe, BrowserScheduler},
    contact::{ContactMessage, NotificationPhase, SubmitStatus},
    content::{
        card_delay_ms, filter_projects, Project, Skill, Stat, ABOUT_HIGHLIGHTS, ALL_CATEGORIES,
        HERO_DESCRIPTION, HERO_TITLE, LEARNING_GOALS, OWNER_FIRST_NAME, OWNER_LAST_NAME,
        PROJECT_FILTERS, RESUME_PATH, SKILL_CATEGORIES, STATS,
    },
    counter::{self, AnimatedCounter},
    log::LogLevel,
    page::Page,
    pointer::{enabled_for_viewport, PointerFollower},
    progress_bar::{skill_bar_delay_ms, ProgressBarAnimator},
    scheduler::{Debouncer, Scheduler},
    scroll::Section,
    signal::ReadSignal,
    typewriter,
    visibility::{AnimationTag, Intersection},
};
use gloo::events::EventListener;
use serde_json::json;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::JsCast;
use web_sys::{
    window, Element, Event, HtmlElement, HtmlInputElement, HtmlTextAreaElement, KeyboardEvent,
};
use yew::prelude::*;

const REVEAL_ROOT_MARGIN: &str = "-50px";
const SECTION_REVEAL_THRESHOLD: f64 = 0.1;
const CARD_REVEAL_THRESHOLD: f64 = 0.1;
const COUNTER_REVEAL_THRESHOLD: f64 = 0.5;
const BAR_REVEAL_THRESHOLD: f64 = 0.5;

/// Mirrors a signal into component state for as long as the component is mounted.
#[hook]
fn use_signal<T>(signal: &ReadSignal<T>) -> T
where
    T: Clone + PartialEq + 'static,
{
    let value = use_state_eq(|| signal.get());
    {
        let value = value.clone();
        use_effect_with(signal.clone(), move |signal| {
            value.set(signal.get());
            let subscription = signal.subscribe(move |next: &T| value.set(next.clone()));
            move || drop(subscription)
        });
    }
    (*value).clone()
}

/// Watches the element behind the returned ref and flips to true once, when it first
/// crosses `threshold`. Without `IntersectionObserver` support the element is shown
/// immediately.
#[hook]
fn use_reveal(
    page: &Page,
    tag: AnimationTag,
    threshold: f64,
    root_margin: Option<&'static str>,
) -> (NodeRef, bool) {
    let node = use_node_ref();
    let visible = use_state_eq(|| false);

    {
        let page = page.clone();
        let node = node.clone();
        let visible = visible.clone();
        use_effect_with((), move |_| {
            let watch = page
                .visibility()
                .watch(tag, threshold, move || visible.set(true));

            let binding = match node.cast::<Element>() {
                Some(element) => {
                    match browser::bind_intersection(&element, &watch, page.visibility(), root_margin) {
                        Ok(binding) => Some(binding),
                        Err(error) => {
                            page.log(
                                LogLevel::Debug,
                                "intersection_unavailable",
                                json!({ "tag": tag, "error": error }),
                            );
                            page.visibility()
                                .report(watch.id(), Intersection::visible(1.0));
                            None
                        }
                    }
                }
                None => {
                    page.log(LogLevel::Debug, "reveal_target_missing", json!({ "tag": tag }));
                    None
                }
            };

            move || {
                drop(binding);
                drop(watch);
            }
        });
    }

    (node, *visible)
}

fn scroll_to(page: &Page, section: Section) {
    if let Err(error) = browser::scroll_to_section(section, page.config().header_offset_px) {
        page.log(
            LogLevel::Debug,
            "scroll_target_missing",
            json!({ "section": section, "error": error }),
        );
    }
}

fn field_value(event: &InputEvent) -> String {
    if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
        return input.value();
    }
    event
        .target_dyn_into::<HtmlTextAreaElement>()
        .map(|area| area.value())
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
struct PageProps {
    page: Page,
}

#[function_component(ScrollProgress)]
fn scroll_progress(props: &PageProps) -> Html {
    let fraction = use_signal(&props.page.scroll_state().fraction);
    let percent = fraction * 100.0;

    html! {
        <div
            class="scroll-progress"
            role="progressbar"
            aria-label="Progression de lecture"
            aria-valuemin="0"
            aria-valuemax="100"
            aria-valuenow={format!("{percent:.0}")}
            style={format!("width: {percent:.2}%;")}
        />
    }
}

#[function_component(SiteHeader)]
fn site_header(props: &PageProps) -> Html {
    let page = &props.page;
    let scroll = page.scroll_state();
    let active = use_signal(&scroll.active_section);
    let condensed = use_signal(&scroll.header_condensed);
    let theme = use_signal(&page.theme());
    let menu_open = use_signal(&page.menu_open());

    let on_toggle_theme = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| {
            let next = page.toggle_theme();
            browser::apply_theme_with_transition(next);
        })
    };

    let on_toggle_menu = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| {
            page.toggle_menu();
        })
    };

    let nav_links = |list_class: &'static str| {
        html! {
            <ul class={list_class}>
                { for Section::ALL.into_iter().map(|section| {
                    let is_active = active == Some(section);
                    let onclick = {
                        let page = page.clone();
                        Callback::from(move |event: MouseEvent| {
                            event.prevent_default();
                            page.close_menu();
                            scroll_to(&page, section);
                        })
                    };
                    html! {
                        <li key={section.dom_id()}>
                            <a
                                class={classes!("nav-link", is_active.then_some("active"))}
                                href={format!("#{}", section.dom_id())}
                                aria-current={is_active.then_some("page")}
                                onclick={onclick}
                            >
                                {section.label()}
                            </a>
                        </li>
                    }
                }) }
            </ul>
        }
    };

    html! {
        <header class={classes!("site-header", condensed.then_some("scrolled"))}>
            <nav class="navbar" aria-label="Navigation principale">
                <a class="logo" href="#accueil">{format!("{OWNER_FIRST_NAME} {OWNER_LAST_NAME}")}</a>
                { nav_links("nav-menu") }
                <div class="nav-actions">
                    <button
                        class="theme-toggle"
                        type="button"
                        aria-label={theme.toggle_label()}
                        aria-pressed={theme.pressed().to_string()}
                        onclick={on_toggle_theme}
                    >
                        <span aria-hidden="true">{theme.icon()}</span>
                    </button>
                    <button
                        class={classes!("mobile-menu-toggle", menu_open.then_some("active"))}
                        type="button"
                        aria-label="Menu"
                        aria-expanded={menu_open.to_string()}
                        onclick={on_toggle_menu}
                    >
                        <span class="bar" /><span class="bar" /><span class="bar" />
                    </button>
                </div>
            </nav>
            <div class={classes!("mobile-menu", menu_open.then_some("active"))}>
                { nav_links("mobile-nav") }
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct HeroProps {
    page: Page,
    scene_enabled: bool,
}

#[function_component(Hero)]
fn hero(props: &HeroProps) -> Html {
    let typed = use_state_eq(|| (String::new(), false));

    {
        let page = props.page.clone();
        let typed = typed.clone();
        use_effect_with((), move |_| {
            let config = page.config();
            let typing = typewriter::start(
                page.scheduler(),
                HERO_TITLE,
                config.typing_start_delay_ms,
                config.typing_char_interval_ms,
                move |text, complete| typed.set((text.to_string(), complete)),
            );
            move || drop(typing)
        });
    }

    let to_section = |section: Section| {
        let page = props.page.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            scroll_to(&page, section);
        })
    };

    let (text, complete) = (*typed).clone();

    html! {
        <section id={Section::Home.dom_id()} class="hero">
            if props.scene_enabled {
                <canvas id="hero-scene" class="hero-scene" aria-hidden="true" />
            } else {
                <div class="hero-fallback" aria-hidden="true" />
            }
            <div class="hero-content">
                <p class="hero-greeting animate-fade-in">{"Bonjour, je suis"}</p>
                <h1 class="hero-name">
                    <span class="animate-slide-up">{OWNER_FIRST_NAME}</span>
                    <span class="gradient-text animate-slide-up">{OWNER_LAST_NAME}</span>
                </h1>
                <p class="hero-title" aria-label={HERO_TITLE}>
                    <span>{text}</span>
                    <span class={classes!("typing-cursor", complete.then_some("is-done"))} aria-hidden="true" />
                </p>
                <p class="hero-description">{HERO_DESCRIPTION}</p>
                <div class="hero-actions">
                    <a class="btn btn-primary" href="#projets" onclick={to_section(Section::Projects)}>
                        {"Voir mes projets"}
                    </a>
                    <a class="btn btn-outline" href="#contact" onclick={to_section(Section::Contact)}>
                        {"Me contacter"}
                    </a>
                    <a class="btn btn-ghost" href={RESUME_PATH} download="">{"Telecharger CV"}</a>
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct SectionHeadingProps {
    visible: bool,
    number: &'static str,
    title: &'static str,
    subtitle: &'static str,
}

#[function_component(SectionHeading)]
fn section_heading(props: &SectionHeadingProps) -> Html {
    html! {
        <div class={classes!("section-header", AnimationTag::SectionHeader.class(props.visible))}>
            <span class="section-number">{props.number}</span>
            <h2 class="section-title gradient-text">{props.title}</h2>
            <p class="section-subtitle">{props.subtitle}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct StatProps {
    page: Page,
    stat: Stat,
}

#[function_component(StatCounter)]
fn stat_counter(props: &StatProps) -> Html {
    let stat = props.stat;
    let (node, visible) = use_reveal(
        &props.page,
        AnimationTag::Counter,
        COUNTER_REVEAL_THRESHOLD,
        None,
    );
    let shown = use_state_eq(|| AnimatedCounter::new(stat.value, stat.suffix).display());

    {
        let page = props.page.clone();
        let shown = shown.clone();
        use_effect_with(visible, move |visible| {
            let running = visible.then(|| {
                let mut display = AnimatedCounter::new(stat.value, stat.suffix);
                counter::start(
                    page.scheduler().as_ref(),
                    stat.value,
                    page.config().counter_duration_ms,
                    move |step| {
                        display.apply(step);
                        shown.set(display.display());
                    },
                )
            });
            move || drop(running)
        });
    }

    html! {
        <div ref={node} class={classes!("stat", AnimationTag::Counter.class(visible))}>
            <div class="stat-value">{(*shown).clone()}</div>
            <div class="stat-label">{stat.label}</div>
        </div>
    }
}

#[function_component(About)]
fn about(props: &PageProps) -> Html {
    let page = &props.page;
    let (node, visible) = use_reveal(
        page,
        AnimationTag::SectionHeader,
        SECTION_REVEAL_THRESHOLD,
        Some(REVEAL_ROOT_MARGIN),
    );

    html! {
        <section ref={node} id={Section::About.dom_id()} class="section about">
            <SectionHeading
                visible={visible}
                number="01"
                title="A propos de moi"
                subtitle="Developpeur Full Stack passionne par la creation d'applications web completes"
            />
            <div class={classes!("about-text", AnimationTag::FadeIn.class(visible))}>
                <h3>{"Competences Full Stack"}</h3>
                <ul class="about-highlights">
                    { for ABOUT_HIGHLIGHTS.iter().map(|highlight| html! { <li key={*highlight}>{*highlight}</li> }) }
                </ul>
                <div class="stats">
                    { for STATS.iter().map(|stat| html! {
                        <StatCounter key={stat.label} page={page.clone()} stat={*stat} />
                    }) }
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    page: Page,
    project: &'static Project,
    index: usize,
    on_select: Callback<&'static Project>,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = props.project;
    let (node, visible) = use_reveal(
        &props.page,
        AnimationTag::FadeIn,
        CARD_REVEAL_THRESHOLD,
        Some(REVEAL_ROOT_MARGIN),
    );

    let on_details = {
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(project))
    };

    html! {
        <article
            ref={node}
            class={classes!("project-card", AnimationTag::FadeIn.class(visible))}
            style={format!("animation-delay: {}ms;", card_delay_ms(props.index))}
        >
            <div class="project-image">
                <img src={project.image} alt={project.title} loading="lazy" />
                <div class="project-overlay">
                    <a
                        class="project-link"
                        href={project.live_url}
                        target="_blank"
                        rel="noopener noreferrer"
                        aria-label={format!("Voir le projet {}", project.title)}
                    >
                        {"↗"}
                    </a>
                    <button
                        class="project-details"
                        type="button"
                        aria-label={format!("Details du projet {}", project.title)}
                        onclick={on_details}
                    >
                        {"+"}
                    </button>
                </div>
            </div>
            <div class="project-content">
                <span class="project-category">{project.category_label}</span>
                <h3>{project.title}</h3>
                <p>{project.description}</p>
                <div class="project-tech">
                    { for project.technologies.iter().map(|tech| html! { <span key={*tech}>{*tech}</span> }) }
                </div>
            </div>
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectModalProps {
    project: &'static Project,
    on_close: Callback<()>,
}

#[function_component(ProjectModal)]
fn project_modal(props: &ProjectModalProps) -> Html {
    {
        let on_close = props.on_close.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|window| {
                EventListener::new(&window, "keydown", move |event: &Event| {
                    if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                        if event.key() == "Escape" {
                            on_close.emit(());
                        }
                    }
                })
            });
            move || drop(listener)
        });
    }

    let project = props.project;
    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_dialog_click = Callback::from(|event: MouseEvent| event.stop_propagation());

    html! {
        <div class="modal active" onclick={on_backdrop.clone()}>
            <div class="modal-content" role="dialog" aria-modal="true" aria-label={project.title} onclick={on_dialog_click}>
                <button class="modal-close" type="button" aria-label="Fermer" onclick={on_backdrop}>{"×"}</button>
                <h3>{project.title}</h3>
                <p class="muted">{project.category_label}</p>
                <img src={project.image} alt={project.title} />
                <p>{project.description}</p>
                <h4>{"Fonctionnalites"}</h4>
                <ul>
                    { for project.features.iter().map(|feature| html! { <li key={*feature}>{*feature}</li> }) }
                </ul>
                <a class="btn btn-primary" href={project.live_url} target="_blank" rel="noopener noreferrer">
                    {"Voir le projet en ligne"}
                </a>
            </div>
        </div>
    }
}

#[function_component(Projects)]
fn projects(props: &PageProps) -> Html {
    let page = &props.page;
    let (node, visible) = use_reveal(
        page,
        AnimationTag::SectionHeader,
        SECTION_REVEAL_THRESHOLD,
        Some(REVEAL_ROOT_MARGIN),
    );
    let filter = use_state_eq(|| ALL_CATEGORIES);
    let selected = use_state_eq(|| None::<&'static Project>);

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |project: &'static Project| selected.set(Some(project)))
    };
    let on_close = {
        let selected = selected.clone();
        Callback::from(move |_: ()| selected.set(None))
    };

    html! {
        <section ref={node} id={Section::Projects.dom_id()} class="section projects">
            <SectionHeading
                visible={visible}
                number="02"
                title="Mes Projets"
                subtitle="Decouvrez mes realisations et experimentations"
            />
            <div class={classes!("project-filters", AnimationTag::FadeIn.class(visible))}>
                { for PROJECT_FILTERS.into_iter().map(|(id, label)| {
                    let onclick = {
                        let filter = filter.clone();
                        Callback::from(move |_: MouseEvent| filter.set(id))
                    };
                    html! {
                        <button
                            key={id}
                            type="button"
                            class={classes!("filter-btn", (*filter == id).then_some("active"))}
                            onclick={onclick}
                        >
                            {label}
                        </button>
                    }
                }) }
            </div>
            <div class="projects-grid">
                { for filter_projects(*filter).into_iter().enumerate().map(|(index, project)| html! {
                    <ProjectCard
                        key={project.id}
                        page={page.clone()}
                        project={project}
                        index={index}
                        on_select={on_select.clone()}
                    />
                }) }
            </div>
            if let Some(project) = *selected {
                <ProjectModal project={project} on_close={on_close} />
            }
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct SkillBarProps {
    page: Page,
    skill: Skill,
    delay_ms: u32,
}

#[function_component(SkillBar)]
fn skill_bar(props: &SkillBarProps) -> Html {
    let (node, visible) = use_reveal(
        &props.page,
        AnimationTag::ProgressBar,
        BAR_REVEAL_THRESHOLD,
        None,
    );
    let width = use_state_eq(|| 0.0_f64);
    let animator = use_mut_ref(ProgressBarAnimator::new);

    {
        let page = props.page.clone();
        let width = width.clone();
        let target = f64::from(props.skill.percent);
        let delay_ms = props.delay_ms;
        use_effect_with(visible, move |visible| {
            if *visible {
                animator.borrow().start(
                    page.scheduler().as_ref(),
                    target,
                    delay_ms,
                    move |percent| width.set(percent),
                );
            }
            || ()
        });
    }

    html! {
        <div ref={node} class="skill-item">
            <div class="skill-info">
                <span class="skill-name">{props.skill.name}</span>
                <span class="skill-percentage">{format!("{}%", props.skill.percent)}</span>
            </div>
            <div class="skill-bar">
                <div class="skill-progress" style={format!("width: {}%;", *width)} />
            </div>
        </div>
    }
}

#[function_component(Skills)]
fn skills(props: &PageProps) -> Html {
    let page = &props.page;
    let (node, visible) = use_reveal(
        page,
        AnimationTag::SectionHeader,
        SECTION_REVEAL_THRESHOLD,
        Some(REVEAL_ROOT_MARGIN),
    );

    html! {
        <section ref={node} id={Section::Skills.dom_id()} class="section skills">
            <SectionHeading
                visible={visible}
                number="03"
                title="Competences"
                subtitle="Technologies et outils que je maitrise"
            />
            <div class="skills-grid">
                { for SKILL_CATEGORIES.iter().enumerate().map(|(category_index, category)| html! {
                    <div key={category.title} class={classes!("skill-category", AnimationTag::SlideUp.class(visible))}>
                        <h3>{category.title}</h3>
                        { for category.skills.iter().enumerate().map(|(skill_index, skill)| html! {
                            <SkillBar
                                key={skill.name}
                                page={page.clone()}
                                skill={*skill}
                                delay_ms={skill_bar_delay_ms(category_index, skill_index)}
                            />
                        }) }
                    </div>
                }) }
            </div>
            <div class={classes!("learning-path", AnimationTag::FadeIn.class(visible))}>
                <h3>{"Prochaines etapes"}</h3>
                <p class="muted">{"Technologies en cours d'apprentissage"}</p>
                <div class="learning-grid">
                    { for LEARNING_GOALS.iter().map(|goal| {
                        let width = if visible { goal.percent } else { 0 };
                        html! {
                            <div key={goal.name} class="learning-item">
                                <span>{goal.name}</span>
                                <span class="learning-percent">{format!("{}%", goal.percent)}</span>
                                <div class="learning-bar">
                                    <div class="learning-progress" style={format!("width: {width}%;")} />
                                </div>
                            </div>
                        }
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(Contact)]
fn contact(props: &PageProps) -> Html {
    let page = &props.page;
    let (node, visible) = use_reveal(
        page,
        AnimationTag::SectionHeader,
        SECTION_REVEAL_THRESHOLD,
        Some(REVEAL_ROOT_MARGIN),
    );
    let form = use_state_eq(ContactMessage::default);
    let sending = use_signal(&page.contact().sending());

    let on_field = |update: fn(&mut ContactMessage, String)| {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let mut next = (*form).clone();
            update(&mut next, field_value(&event));
            form.set(next);
        })
    };

    let onsubmit = {
        let page = page.clone();
        let form = form.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let reset = form.clone();
            let status = page
                .contact()
                .submit(&form, move || reset.set(ContactMessage::default()));
            if let SubmitStatus::Rejected(reason) = status {
                page.log(LogLevel::Debug, "contact_rejected", json!({ "reason": reason }));
            }
        })
    };

    html! {
        <section ref={node} id={Section::Contact.dom_id()} class="section contact">
            <SectionHeading
                visible={visible}
                number="04"
                title="Contact"
                subtitle="Un projet en tete ? Parlons-en."
            />
            <form class={classes!("contact-form", AnimationTag::SlideUp.class(visible))} onsubmit={onsubmit} novalidate=true>
                <label>
                    {"Nom"}
                    <input
                        type="text"
                        name="name"
                        value={form.name.clone()}
                        oninput={on_field(|form, value| form.name = value)}
                    />
                </label>
                <label>
                    {"Email"}
                    <input
                        type="email"
                        name="email"
                        value={form.email.clone()}
                        oninput={on_field(|form, value| form.email = value)}
                    />
                </label>
                <label>
                    {"Sujet"}
                    <input
                        type="text"
                        name="subject"
                        value={form.subject.clone()}
                        oninput={on_field(|form, value| form.subject = value)}
                    />
                </label>
                <label>
                    {"Message"}
                    <textarea
                        name="message"
                        rows="5"
                        value={form.message.clone()}
                        oninput={on_field(|form, value| form.message = value)}
                    />
                </label>
                <button class="btn btn-primary" type="submit" disabled={sending}>
                    { if sending { "Envoi en cours..." } else { "Envoyer le message" } }
                </button>
            </form>
        </section>
    }
}

#[function_component(Notifications)]
fn notifications(props: &PageProps) -> Html {
    let items = use_signal(&props.page.contact().notifier().items());

    html! {
        <div class="notifications" aria-live="polite">
            { for items.iter().map(|item| {
                let phase = match item.phase {
                    NotificationPhase::Entering => None,
                    NotificationPhase::Shown => Some("show"),
                    NotificationPhase::Leaving => Some("hide"),
                };
                html! {
                    <div key={item.id.to_string()} class={classes!("notification", item.kind.class(), phase)} role="status">
                        {item.message.clone()}
                    </div>
                }
            }) }
        </div>
    }
}

#[function_component(CursorFollower)]
fn cursor_follower(props: &PageProps) -> Html {
    let node = use_node_ref();
    let width = use_state_eq(|| browser::viewport_size().0);

    {
        let page = props.page.clone();
        let width = width.clone();
        use_effect_with((), move |_| {
            let scheduler = page.scheduler();
            let mut debouncer = Debouncer::new(page.config().resize_debounce_ms);
            let listener = window().map(|window| {
                EventListener::new(&window, "resize", move |_event: &Event| {
                    let width = width.clone();
                    debouncer.call(scheduler.as_ref(), move || {
                        width.set(browser::viewport_size().0)
                    });
                })
            });
            move || drop(listener)
        });
    }

    let enabled = enabled_for_viewport(*width);

    {
        let page = props.page.clone();
        let node = node.clone();
        let current_width = *width;
        use_effect_with(enabled, move |_| {
            let tracking = PointerFollower::for_viewport(current_width).and_then(|follower| {
                let follower = Rc::new(RefCell::new(follower));
                let window = window()?;

                let moved = {
                    let follower = Rc::clone(&follower);
                    EventListener::new(&window, "mousemove", move |event: &Event| {
                        if let Some(event) = event.dyn_ref::<MouseEvent>() {
                            follower
                                .borrow_mut()
                                .pointer_moved(f64::from(event.client_x()), f64::from(event.client_y()));
                        }
                    })
                };

                let frames = page.scheduler().on_each_frame(Box::new(move || {
                    let position = follower.borrow_mut().step();
                    if let Some(element) = node.cast::<HtmlElement>() {
                        let _ = element.style().set_property(
                            "transform",
                            &format!("translate3d({:.2}px, {:.2}px, 0)", position.x, position.y),
                        );
                    }
                }));

                Some((moved, frames))
            });
            move || drop(tracking)
        });
    }

    if enabled {
        html! { <div ref={node} class="cursor-follower" aria-hidden="true" /> }
    } else {
        html! {}
    }
}

#[function_component(App)]
fn app() -> Html {
    let page = use_memo((), |_| {
        let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler);
        Page::new(
            scheduler,
            browser::config_from_document(),
            browser::preference_store(),
            browser::system_prefers_dark(),
        )
    });
    let page: Page = (*page).clone();
    let scene_enabled = page.capability(&BrowserProbe).enabled();
    let menu_open = use_signal(&page.menu_open());

    {
        let page = page.clone();
        use_effect_with((), move |_| {
            let theme = page.theme().get();
            browser::apply_theme(theme);
            page.log(
                LogLevel::Info,
                "page_mounted",
                json!({ "theme": theme, "scene_enabled": scene_enabled }),
            );

            if let Some(metrics) = browser::scroll_metrics() {
                page.measure_scroll(metrics, &browser::section_offsets());
            }

            let section_log = {
                let page = page.clone();
                page.scroll_state().active_section.subscribe(move |section| {
                    page.log(
                        LogLevel::Debug,
                        "active_section_changed",
                        json!({ "section": section }),
                    );
                })
            };

            let listeners = window().map(|window| {
                let on_scroll = {
                    let page = page.clone();
                    EventListener::new(&window, "scroll", move |_event: &Event| {
                        page.handle_scroll(|| {
                            browser::scroll_metrics()
                                .map(|metrics| (metrics, browser::section_offsets()))
                        });
                    })
                };
                let on_key = {
                    let page = page.clone();
                    EventListener::new(&window, "keydown", move |event: &Event| {
                        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                            page.handle_key(&event.key());
                        }
                    })
                };
                [on_scroll, on_key]
            });

            move || {
                drop(listeners);
                drop(section_log);
            }
        });
    }

    use_effect_with(menu_open, |open| {
        browser::set_body_scroll_locked(*open);
        || ()
    });

    html! {
        <>
            <a class="skip-link" href="#content">{"Aller au contenu"}</a>
            <ScrollProgress page={page.clone()} />
            <SiteHeader page={page.clone()} />
            <main id="content">
                <Hero page={page.clone()} scene_enabled={scene_enabled} />
                <About page={page.clone()} />
                <Projects page={page.clone()} />
                <Skills page={page.clone()} />
                <Contact page={page.clone()} />
            </main>
            <footer class="site-footer">
                <p>{format!("© {OWNER_FIRST_NAME} {OWNER_LAST_NAME}")}</p>
            </footer>
            <Notifications page={page.clone()} />
            <CursorFollower page={page.clone()} />
        </>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
