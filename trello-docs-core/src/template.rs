//! Static stylesheet and client-side script embedded in every document.

pub const STYLES: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            line-height: 1.6;
            color: #333;
            background-color: #f5f6fa;
        }

        .header {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            padding: 2rem 0;
            text-align: center;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }

        .header h1 { font-size: 2.5rem; margin-bottom: 0.5rem; }
        .header p { font-size: 1.1rem; opacity: 0.9; }

        .container { max-width: 1200px; margin: 0 auto; padding: 0 1rem; }

        .logo-container { text-align: center; padding: 1rem 0; }
        .logo { max-width: 100%; height: auto; }

        .search-section {
            background: white;
            padding: 1.5rem;
            margin: 2rem 0;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }

        .search-box {
            width: 100%;
            padding: 1rem;
            font-size: 1.1rem;
            border: 2px solid #e1e8ed;
            border-radius: 6px;
            outline: none;
            transition: border-color 0.3s;
        }

        .search-box:focus { border-color: #667eea; }

        .stats {
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-top: 1rem;
            font-size: 0.9rem;
            color: #666;
        }

        .document-section { margin-bottom: 2.5rem; }

        .section-title {
            font-size: 1.8rem;
            color: #333;
            padding-bottom: 0.5rem;
            margin-bottom: 1.5rem;
            border-bottom: 3px solid #667eea;
        }

        .section-number { color: #667eea; }
        .section-count { font-size: 1rem; color: #666; font-weight: normal; }

        .card-item {
            background: white;
            margin-bottom: 1.5rem;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            overflow: hidden;
        }

        .card-header { padding: 1.5rem 1.5rem 1rem; border-bottom: 1px solid #e1e8ed; }
        .card-title { font-size: 1.4rem; margin-bottom: 0.5rem; }
        .card-title a { color: #333; text-decoration: none; }
        .card-title a:hover { color: #667eea; }
        .card-number { font-weight: 600; color: #667eea; }

        .card-meta { display: flex; align-items: center; gap: 0.5rem; flex-wrap: wrap; }
        .card-labels { display: flex; gap: 0.5rem; flex-wrap: wrap; }

        .label {
            padding: 0.2rem 0.6rem;
            border-radius: 12px;
            font-size: 0.8rem;
            color: white;
            font-weight: 500;
        }

        .card-id {
            padding: 0.2rem 0.6rem;
            border-radius: 12px;
            font-size: 0.8rem;
            font-weight: 500;
            background: #f1f3f4;
            color: #666;
        }

        .card-content { padding: 1.5rem; }
        .card-content h1, .card-content h2, .card-content h3 { margin: 1rem 0 0.5rem; color: #333; }
        .card-content h1 { font-size: 1.3rem; }
        .card-content h2 { font-size: 1.2rem; }
        .card-content h3 { font-size: 1.1rem; }
        .card-content p { margin-bottom: 1rem; }

        .card-content code {
            background: #f8f9fa;
            padding: 0.2rem 0.4rem;
            border-radius: 3px;
            font-family: 'Monaco', 'Consolas', monospace;
            font-size: 0.9rem;
        }

        .card-content pre {
            background: #f8f9fa;
            padding: 1rem;
            border-radius: 6px;
            overflow-x: auto;
            margin: 1rem 0;
        }

        .card-content pre code { background: none; padding: 0; }

        .special-block {
            margin: 1rem 0;
            border-left: 4px solid #f2d600;
            background: #fffbe6;
            border-radius: 4px;
            padding: 0.75rem 1rem;
        }

        .special-block-note, .special-block-notes { border-left-color: #0079bf; background: #eef6fc; }
        .special-block-header { font-weight: 700; font-size: 0.8rem; letter-spacing: 0.05em; margin-bottom: 0.25rem; }

        .embedded-image { margin: 1.5rem 0; text-align: center; }

        .card-image {
            max-width: 100%;
            height: auto;
            border-radius: 8px;
            box-shadow: 0 2px 8px rgba(0,0,0,0.1);
            border: 1px solid #e1e8ed;
        }

        .image-caption { margin-top: 0.5rem; font-size: 0.9rem; color: #666; font-style: italic; }

        .attachments-section { padding: 0 1.5rem 1rem; }
        .attachments-section h4 { font-size: 1rem; margin-bottom: 0.5rem; }
        .attachments-list { list-style: none; }
        .attachment-size { color: #666; font-size: 0.85rem; }

        .comments-section { margin: 0 1.5rem 1.5rem; padding-top: 1rem; border-top: 1px solid #e1e8ed; }
        .comments-section h4 { margin-bottom: 1rem; color: #333; font-size: 1rem; }
        .comments-list { display: flex; flex-direction: column; gap: 1rem; }

        .comment-item {
            background: #f8f9fa;
            border-radius: 8px;
            padding: 1rem;
            border-left: 4px solid #667eea;
        }

        .comment-header {
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 0.5rem;
            font-size: 0.85rem;
        }

        .comment-author { font-weight: 600; color: #333; }
        .comment-date { color: #666; font-size: 0.8rem; }
        .comment-content { color: #333; line-height: 1.5; white-space: pre-wrap; }

        .cover-letter-page {
            background: white;
            margin: 2rem 0;
            padding: 3rem;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            text-align: center;
        }

        .cover-title { font-size: 2.5rem; margin-bottom: 2rem; color: #333; }

        .cover-content {
            font-size: 1.1rem;
            line-height: 1.8;
            margin: 0 auto 3rem;
            text-align: left;
            max-width: 800px;
        }

        .cover-meta { color: #666; font-size: 0.9rem; }

        .footer { text-align: center; padding: 2rem; color: #666; font-size: 0.9rem; }

        .no-results { text-align: center; padding: 3rem; color: #666; display: none; }

        @media print {
            body { background: white; }
            .header { background: white !important; color: black !important; box-shadow: none; border-bottom: 2px solid #333; }
            .search-section, .no-results { display: none !important; }
            .card-item { box-shadow: none; border: 1px solid #ddd; break-inside: avoid; margin-bottom: 1rem; }
            .page-break-after { page-break-after: always; break-after: page; }
            .card-title a { color: black !important; text-decoration: none; }
            .footer { border-top: 1px solid #333; margin-top: 2rem; }
            .card-image, .comments-section { page-break-inside: avoid; }
        }

        @media (max-width: 768px) {
            .header h1 { font-size: 2rem; }
            .container { padding: 0 0.5rem; }
            .card-header, .card-content { padding: 1rem; }
        }
"#;

/// Substring search over each card's `data-search` attribute, hiding
/// sections left without visible cards, plus a print-time reset so every
/// card is printed regardless of the current filter.
pub const SCRIPT: &str = r#"
    (function() {
        const searchBox = document.getElementById('searchBox');
        const cardsContainer = document.getElementById('cardsContainer');
        const resultCount = document.getElementById('resultCount');
        const noResults = document.getElementById('noResults');
        const allCards = document.querySelectorAll('.card-item');
        const allSections = document.querySelectorAll('.document-section');

        function applyFilter(term) {
            let visibleCount = 0;
            allCards.forEach(function(card) {
                const searchData = card.getAttribute('data-search') || '';
                const match = searchData.includes(term);
                card.style.display = match ? '' : 'none';
                if (match) visibleCount++;
            });
            allSections.forEach(function(section) {
                const visible = Array.from(section.querySelectorAll('.card-item'))
                    .some(function(card) { return card.style.display !== 'none'; });
                section.style.display = visible ? '' : 'none';
            });
            if (resultCount) {
                resultCount.textContent = visibleCount + ' card' + (visibleCount !== 1 ? 's' : '') + ' found';
            }
            if (noResults) noResults.style.display = visibleCount === 0 ? 'block' : 'none';
            if (cardsContainer) cardsContainer.style.display = visibleCount === 0 ? 'none' : '';
        }

        if (searchBox) {
            searchBox.addEventListener('input', function(e) {
                applyFilter(e.target.value.toLowerCase());
            });
        }

        window.addEventListener('beforeprint', function() {
            allCards.forEach(function(card) { card.style.display = ''; });
            allSections.forEach(function(section) { section.style.display = ''; });
            if (cardsContainer) cardsContainer.style.display = '';
        });

        window.addEventListener('afterprint', function() {
            if (searchBox) applyFilter(searchBox.value.toLowerCase());
        });
    })();
"#;
