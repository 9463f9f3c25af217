// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! HTML templates for the gallery pages

use minijinja::Environment;

use crate::Result;

pub const BASE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}{{ site_title }}{% endblock %}</title>
    <meta name="description" content="{% block description %}Sphere, Panorama and amazing images{% endblock %}">
    <style>
        :root {
            --bg-primary: #1a1a2e;
            --bg-secondary: #16213e;
            --bg-card: #0f3460;
            --text-primary: #e8e8e8;
            --text-secondary: #a0a0a0;
            --accent: #e94560;
            --accent-hover: #ff6b6b;
            --border: #2a2a4a;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.6;
        }
        a { color: inherit; }
        .container { max-width: 1400px; margin: 0 auto; padding: 24px; }
        nav {
            background: var(--bg-secondary);
            padding: 15px 20px;
            display: flex;
            align-items: center;
            gap: 30px;
            border-bottom: 1px solid var(--border);
        }
        nav .logo { font-size: 1.5em; font-weight: bold; color: var(--accent); text-decoration: none; }
        nav a { color: var(--text-secondary); text-decoration: none; transition: color 0.2s; }
        nav a:hover { color: var(--text-primary); }
        section { margin-bottom: 48px; }
        .section-head { display: flex; align-items: center; justify-content: space-between; margin-bottom: 20px; }
        .muted { color: var(--text-secondary); }
        .button {
            display: inline-block;
            border: 1px solid var(--border);
            background: var(--bg-secondary);
            color: var(--text-primary);
            padding: 6px 12px;
            border-radius: 6px;
            text-decoration: none;
            cursor: pointer;
            font: inherit;
        }
        .button:hover { border-color: var(--accent); }
        .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 16px; }
        .card { background: var(--bg-card); border-radius: 12px; overflow: hidden; }
        .card .thumb { position: relative; display: block; aspect-ratio: 16 / 9; background: var(--bg-secondary); }
        .card .thumb img { width: 100%; height: 100%; object-fit: cover; }
        .badge {
            position: absolute; top: 8px; left: 8px;
            background: var(--accent); color: white;
            padding: 2px 10px; border-radius: 12px; font-size: 0.75em;
        }
        .card .footer { display: flex; align-items: center; gap: 8px; padding: 10px 12px; }
        .card .footer .name { flex: 1; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; font-size: 0.9em; }
        .empty { text-align: center; padding: 48px 0; background: var(--bg-secondary); border-radius: 12px; }
        .hero { position: relative; height: 60vh; overflow: hidden; }
        .hero img { width: 100%; height: 100%; object-fit: cover; filter: brightness(0.6); }
        .hero .caption { position: absolute; left: 32px; bottom: 32px; }
        .hero h1 { font-size: 2.5em; }
        .share-panel { display: none; flex-direction: column; gap: 8px; margin-top: 8px; }
        .share-panel.open { display: flex; }
    </style>
</head>
<body>
    <nav>
        <a href="/" class="logo">{{ site_title }}</a>
        <a href="/">Home</a>
        <a href="/sphere">360° Spheres</a>
        <a href="/panorama">Panoramas</a>
    </nav>
    {% block body %}<main class="container">{% block content %}{% endblock %}</main>{% endblock %}
    <script>
        async function copyLink(url) {
            try {
                await navigator.clipboard.writeText(new URL(url, window.location.origin).href);
            } catch (err) {
                console.error("Failed to copy:", err);
            }
        }
        async function nativeShare(title, text, url) {
            const href = new URL(url, window.location.origin).href;
            if (navigator.share) {
                try {
                    await navigator.share({ title: title, text: text, url: href });
                } catch (err) {
                    console.error("Error sharing:", err);
                }
            } else {
                await copyLink(href);
            }
        }
    </script>
</body>
</html>"##;

pub const CARD: &str = r##"<div class="card">
    <a class="thumb" href="{{ card.view_url }}" title="View Fullscreen">
        <img src="{{ card.src }}" alt="{{ card.image.filename }}" loading="lazy">
        <span class="badge">{{ card.label }}</span>
    </a>
    <div class="footer">
        <span class="name">{{ card.image.filename }}</span>
        <a class="button" href="{{ card.download_url }}" title="Download">Download</a>
        <button class="button" type="button" title="Share"
            onclick='nativeShare({{ card.image.filename|tojson }}, {{ card.share_text|tojson }}, {{ card.view_url|tojson }})'>Share</button>
    </div>
</div>"##;

pub const HOME: &str = r##"{% extends "base.html" %}
{% block body %}
{% if hero %}
<div class="hero">
    <img src="{{ hero.src }}" alt="{{ hero.image.filename }}">
    <div class="caption">
        <h1>{{ site_title }}</h1>
        <p>{{ sphere_total }} spheres · {{ panorama_total }} panoramas</p>
        <a class="button" href="{{ hero.view_url }}">Explore</a>
    </div>
</div>
{% endif %}
<main class="container">
{% for section in sections %}
    <section>
        <div class="section-head">
            <div>
                <h2>{{ section.heading }}</h2>
                <p class="muted">{{ section.blurb }}</p>
            </div>
            {% if section.cards %}<a class="button" href="/{{ section.category }}">View All →</a>{% endif %}
        </div>
        {% if section.cards %}
        <div class="grid">
            {% for card in section.cards %}{% include "card.html" %}{% endfor %}
        </div>
        {% else %}
        <div class="empty"><p class="muted">{{ section.empty_text }}</p></div>
        {% endif %}
    </section>
{% endfor %}
</main>
{% endblock %}"##;

pub const LISTING: &str = r##"{% extends "base.html" %}
{% block title %}{{ heading }} - {{ site_title }}{% endblock %}
{% block content %}
<section>
    <h1>{{ heading }}</h1>
    <p class="muted">{{ intro }}</p>
</section>
{% if cards %}
<div class="grid">
    {% for card in cards %}{% include "card.html" %}{% endfor %}
</div>
{% else %}
<div class="empty"><p class="muted">{{ empty_text }}</p></div>
{% endif %}
{% endblock %}"##;

pub const VIEWER: &str = r##"{% extends "base.html" %}
{% block title %}{{ title }}{% endblock %}
{% block description %}{{ description }}{% endblock %}
{% block body %}
<div id="viewer" style="position: fixed; inset: 0; background: black; z-index: 50;">
    <img src="{{ image_src }}" alt="{{ position.current.filename }}"
        style="width: 100%; height: 100%; object-fit: contain;">
    <div style="position: absolute; top: 16px; left: 16px;" class="button">
        {{ position.current.filename }} · {{ position.index + 1 }} / {{ position.total }}
    </div>
    <div style="position: absolute; top: 16px; right: 16px; text-align: right;">
        <a class="button" href="{{ download_url }}" title="Download">Download</a>
        <button class="button" type="button" title="Share"
            onclick="document.getElementById('share').classList.toggle('open')">Share</button>
        <button class="button" type="button" title="Fullscreen" onclick="enterFullscreen()">Fullscreen</button>
        <a class="button" href="{{ close_url }}" title="Close">Close</a>
        <div id="share" class="share-panel">
            <button class="button" type="button"
                onclick='nativeShare({{ position.current.filename|tojson }}, {{ share.text|tojson }}, {{ share.url|tojson }})'>Share via System</button>
            <a class="button" href="{{ facebook_url }}" target="_blank" rel="noopener">Share on Facebook</a>
            <a class="button" href="{{ whatsapp_url }}" target="_blank" rel="noopener">Share on WhatsApp</a>
            <a class="button" href="{{ telegram_url }}" target="_blank" rel="noopener">Share on Telegram</a>
            <button class="button" type="button" onclick='copyLink({{ share.url|tojson }})'>Copy Link</button>
        </div>
    </div>
    {% if previous_url %}
    <a id="prev" class="button" href="{{ previous_url }}" title="Previous Image"
        style="position: absolute; left: 16px; top: 50%;">←</a>
    {% endif %}
    {% if next_url %}
    <a id="next" class="button" href="{{ next_url }}" title="Next Image"
        style="position: absolute; right: 16px; top: 50%;">→</a>
    {% endif %}
</div>
<script>
    const previousUrl = {{ previous_url|tojson }};
    const nextUrl = {{ next_url|tojson }};
    const closeUrl = {{ close_url|tojson }};
    async function enterFullscreen() {
        try {
            if (!document.fullscreenElement) {
                await document.getElementById("viewer").requestFullscreen();
            }
        } catch (err) {
            console.log("Fullscreen not supported or denied:", err);
        }
    }
    document.addEventListener("keydown", (e) => {
        if (e.key === "ArrowLeft" && previousUrl) {
            window.location.href = previousUrl;
        } else if (e.key === "ArrowRight" && nextUrl) {
            window.location.href = nextUrl;
        } else if (e.key === "Escape" && !document.fullscreenElement) {
            window.location.href = closeUrl;
        }
    });
</script>
{% endblock %}"##;

pub const NOT_FOUND: &str = r##"{% extends "base.html" %}
{% block title %}Not Found - {{ site_title }}{% endblock %}
{% block content %}
<div class="empty">
    <h1>404</h1>
    <p class="muted">This image or page does not exist.</p>
    <p><a class="button" href="/">Back to gallery</a></p>
</div>
{% endblock %}"##;

/// Build the template environment with every page registered
pub fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("base.html", BASE)?;
    env.add_template("card.html", CARD)?;
    env.add_template("home.html", HOME)?;
    env.add_template("listing.html", LISTING)?;
    env.add_template("viewer.html", VIEWER)?;
    env.add_template("not_found.html", NOT_FOUND)?;
    Ok(env)
}
